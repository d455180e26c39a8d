use crate::error::{ClientError, ExecuteError};
use crate::executor::build_request;
use crate::http_client::reqwest::ReqwestHttpClient;
use crate::http_client::{ClientConfig, HttpClient, Response};
use crate::model::{HeaderMultiMap, RequestInput};
use crate::validator::validate_method;
use std::time::Duration;


pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Library entry point for sending a request without going through a command
/// payload. The caller owns the returned body and is expected to close it,
/// e.g. by wrapping it in a [`ScopedBody`](crate::http_client::ScopedBody).
pub struct FlyteHttpClient<C: HttpClient = ReqwestHttpClient> {
    client: C,
}

impl FlyteHttpClient {
    /// A reqwest backed client with a 10 second timeout.
    pub fn new() -> Result<Self, ClientError> {
        let client = ReqwestHttpClient::create(ClientConfig::new(Some(DEFAULT_TIMEOUT)))
            .map_err(ExecuteError::from)?;
        Ok(Self::with_client(client))
    }
}

impl<C: HttpClient> FlyteHttpClient<C> {
    pub fn with_client(client: C) -> Self {
        Self { client }
    }

    pub fn do_request(
        &self,
        method: &str,
        url: &str,
        body: &str,
        headers: &HeaderMultiMap,
    ) -> Result<Response, ClientError> {
        validate_args(method, url)?;

        let input = RequestInput {
            method: method.to_string(),
            url: url.to_string(),
            headers: headers.clone(),
            body: body.to_string(),
            ..RequestInput::default()
        };
        let request = build_request(&input)?;

        Ok(self.client.execute(request).map_err(ExecuteError::from)?)
    }
}

fn validate_args(method: &str, url: &str) -> Result<(), ClientError> {
    if method.is_empty() {
        return Err(ClientError::MethodNotSet);
    }
    validate_method(method).map_err(|_| ClientError::InvalidMethod)?;
    if url.is_empty() {
        return Err(ClientError::UrlNotSet);
    }
    Ok(())
}
