//! # flyte-http
//!
//! A flyte pack exposing a single `DoRequest` command. The command takes a JSON
//! payload describing an HTTP request, performs it, and answers with either a
//! `DoRequestSuccess` event carrying the response or a `DoRequestFailed` event
//! echoing the input along with the error.
//!
//! ```text,no_run
//! {
//!     "method": "POST",
//!     "url": "http://example.com/hook",
//!     "headers": {"Content-Type": ["application/json"]},
//!     "body": "{\"id\": 42}",
//!     "timeout": "5000000000"
//! }
//! ```
//!
//! Response bodies declared as `application/json` are passed through as is,
//! anything else is returned as URL-safe base64.

pub mod classifier;
pub mod client;
pub mod commands;
pub mod config;
pub mod error;
pub mod executor;
pub mod http_client;
pub mod model;
pub mod pack;
pub mod validator;

pub use client::FlyteHttpClient;
pub use commands::{do_request_command, Command, Event, EventDef};
pub use config::Config;
pub use error::{ClientError, ConfigError, ExecuteError, MalformedInput, TransportError};
pub use executor::do_request;
pub use http_client::{Body, ClientConfig, HttpClient, Request, Response};
pub use model::{ErrorOutput, RequestInput, ResponseBody, ResponseOutput, Timeout, TimeoutUnit};
pub use pack::{pack_def, PackDef};
