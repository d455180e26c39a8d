//! # flyte-http
//!
//! A [flyte](https://github.com/HotelsDotCom/flyte) pack for making HTTP requests.
//!
//! ## Commands
//!
//! ### DoRequest
//!
//! **input**
//! ```text,no_run
//! {
//!     "method": "GET",
//!     "url": "http://example.com/resource",
//!     "headers": {"Accept": ["application/json"], "X-Values": ["1", "2"]},
//!     "body": "",
//!     "timeout": "2000000000"
//! }
//! ```
//!
//! `timeout` is counted in nanoseconds unless `FLYTE_HTTP_TIMEOUT_UNIT` says
//! otherwise (`ns`, `ms` or `s`). Zero or missing means no timeout.
//!
//! **DoRequestSuccess**
//! ```text,no_run
//! {
//!     "statusCode": 200,
//!     "header": {"Content-Type": ["application/json"]},
//!     "body": {"id": 1}
//! }
//! ```
//!
//! Bodies that are not `application/json` come back as URL-safe base64.
//!
//! **DoRequestFailed**
//!
//! The input, plus an `error` field describing what went wrong.
//!
//! ## Usage
//!
//! ```text,no_run
//! $ FLYTE_API=http://localhost:8080 flyte-http describe
//! $ echo '{"method":"GET","url":"http://example.com"}' | flyte-http invoke
//! ```
//!
//! Logging goes to stderr and is controlled with `RUST_LOG`.

use anyhow::{anyhow, Context, Result};
use clap::{Arg, ArgMatches, Command as App};
use flyte_http::{pack_def, Config};
use std::fs::read;
use std::io::{stdin, stdout, Read, Write};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const VERSION: &str = env!("CARGO_PKG_VERSION");

fn main() -> Result<()> {
    init_tracing();

    let matches = App::new("flyte-http")
        .version(VERSION)
        .about("Flyte pack performing HTTP requests")
        .subcommand_required(true)
        .subcommand(App::new("describe").about("Prints the pack definition"))
        .subcommand(
            App::new("invoke")
                .about("Runs a command once and prints the resulting event")
                .arg(
                    Arg::new("COMMAND")
                        .short('c')
                        .long("command")
                        .default_value("DoRequest")
                        .help("Name of the command to run"),
                )
                .arg(
                    Arg::new("FILE")
                        .index(1)
                        .help("File holding the JSON input, stdin when absent"),
                ),
        )
        .get_matches();

    let config = Config::from_env().context("Invalid configuration")?;

    match matches.subcommand() {
        Some(("describe", _)) => describe(&config),
        Some(("invoke", args)) => invoke(&config, args),
        _ => Err(anyhow!("Unknown subcommand")),
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(env_filter)
        .init();
}

fn describe(config: &Config) -> Result<()> {
    let api_host = config.api_host()?;
    let description = serde_json::json!({
        "api": api_host.as_str(),
        "pack": pack_def(),
    });
    let mut stdout = stdout();
    serde_json::to_writer_pretty(&mut stdout, &description)?;
    writeln!(stdout)?;
    Ok(())
}

fn invoke(config: &Config, args: &ArgMatches) -> Result<()> {
    let pack = pack_def();
    let name = args
        .get_one::<String>("COMMAND")
        .map(String::as_str)
        .unwrap_or("DoRequest");
    let command = pack
        .command(name)
        .ok_or_else(|| anyhow!("Unknown command {:?} for pack {}", name, pack.name))?;

    let raw_input = match args.get_one::<String>("FILE") {
        Some(file) => read(file).with_context(|| format!("Failed reading input file: {:?}", file))?,
        None => {
            let mut buffer = Vec::new();
            stdin()
                .read_to_end(&mut buffer)
                .context("Failed reading input from stdin")?;
            buffer
        }
    };

    let event = command.handle(&raw_input, config.timeout_unit);

    let mut stdout = stdout();
    serde_json::to_writer(&mut stdout, &event).context("Failed writing event")?;
    writeln!(stdout)?;
    Ok(())
}
