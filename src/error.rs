use std::io;

/// Failures of a single `DoRequest` execution. Every variant ends up as the
/// `error` field of a `DoRequestFailed` event.
#[derive(Debug, thiserror::Error)]
pub enum ExecuteError {
    #[error("no method provided")]
    EmptyMethod,

    #[error("invalid method provided")]
    InvalidMethod,

    #[error("{0}")]
    RequestConstruction(String),

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("failed to read response body: {source}")]
    BodyRead { source: io::Error },

    #[error("failed to close response body: {source}")]
    BodyClose { source: io::Error },
}

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("timeout exceeded while awaiting response: {0}")]
    Timeout(String),

    #[error("connection failed: {0}")]
    Connect(String),

    #[error("could not build http client: {0}")]
    Setup(String),

    #[error("{0}")]
    Other(String),
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        let message = error_chain(&err);
        if err.is_timeout() {
            TransportError::Timeout(message)
        } else if err.is_connect() {
            TransportError::Connect(message)
        } else {
            TransportError::Other(message)
        }
    }
}

// reqwest keeps the interesting part (refused, dns, ...) in the source chain
fn error_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

/// Argument and request failures of [`FlyteHttpClient`](crate::client::FlyteHttpClient).
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("error: method not set")]
    MethodNotSet,

    #[error("error: invalid method supplied")]
    InvalidMethod,

    #[error("error: url not set")]
    UrlNotSet,

    #[error(transparent)]
    Request(#[from] ExecuteError),
}

/// The inbound payload could not be deserialized. There is no input to echo
/// back, so this is reported as a fatal event rather than `DoRequestFailed`.
#[derive(Debug, thiserror::Error)]
#[error("could not unmarshall 'doRequest' rawInput into json: {0}")]
pub struct MalformedInput(#[from] pub serde_json::Error);

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("env={0} not set")]
    Missing(&'static str),

    #[error("{key}={value:?} is not valid URL: {source}")]
    InvalidUrl {
        key: &'static str,
        value: String,
        source: url::ParseError,
    },

    #[error("{key}={value:?} is not a valid timeout unit, expected one of ns, ms, s")]
    InvalidTimeoutUnit { key: &'static str, value: String },
}
