use crate::error::TransportError;
use crate::http_client::{Body, ClientConfig, HttpClient, Request, Response};
use reqwest::blocking::Client;
use reqwest::blocking::Request as Reqwest;
use std::io::{self, Read};
use tracing::debug;

pub struct ReqwestHttpClient {
    client: Client,
}

impl HttpClient for ReqwestHttpClient {
    fn create(config: ClientConfig) -> Result<ReqwestHttpClient, TransportError>
    where
        Self: Sized,
    {
        // blocking clients default to a 30s timeout, `None` really means unbounded
        let client = reqwest::blocking::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| TransportError::Setup(e.to_string()))?;

        Ok(ReqwestHttpClient { client })
    }

    fn execute(&self, request: Request) -> Result<Response, TransportError> {
        let request: Reqwest = request.try_into()?;
        debug!(method = %request.method(), url = %request.url(), "sending request");

        let response = self.client.execute(request)?;
        debug!(status = %response.status(), "received response");

        let status = response.status();
        let version = response.version();
        let headers = response.headers().clone();

        let body: Box<dyn Body> = Box::new(ReqwestBody(Some(response)));
        let mut converted = http::Response::new(body);
        *converted.status_mut() = status;
        *converted.version_mut() = version;
        *converted.headers_mut() = headers;

        Ok(converted)
    }
}

struct ReqwestBody(Option<reqwest::blocking::Response>);

impl Read for ReqwestBody {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self.0.as_mut() {
            Some(response) => response.read(buf),
            None => Err(io::Error::new(
                io::ErrorKind::Other,
                "read on closed response body",
            )),
        }
    }
}

impl Body for ReqwestBody {
    fn close(&mut self) -> io::Result<()> {
        // dropping the response hands the connection back to reqwest
        self.0.take();
        Ok(())
    }
}
