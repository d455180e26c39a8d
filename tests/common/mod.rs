#![allow(dead_code)]

use flyte_http::{do_request_command, TimeoutUnit};
use serde_json::Value;
use std::io::Write;
use tempfile::{NamedTempFile, TempPath};

pub fn create_file(contents: &str) -> TempPath {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "{}", contents).unwrap();
    file.into_temp_path()
}

/// Runs `DoRequest` with `input` and returns the serialized event.
pub fn run_do_request(input: Value, unit: TimeoutUnit) -> Value {
    let raw = serde_json::to_vec(&input).unwrap();
    let event = do_request_command().handle(&raw, unit);
    serde_json::to_value(&event).unwrap()
}
