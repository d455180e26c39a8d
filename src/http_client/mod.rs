use crate::error::TransportError;
use std::io::{self, Read};
use std::time::Duration;

pub use body::ScopedBody;


mod body;
pub mod reqwest;

pub type Request = http::Request<Vec<u8>>;

pub type Response = http::Response<Box<dyn Body>>;

/// A response body that has to be released once it has been consumed.
pub trait Body: Read + Send {
    fn close(&mut self) -> io::Result<()>;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClientConfig {
    pub timeout: Option<Duration>,
}

impl ClientConfig {
    pub fn new(timeout: Option<Duration>) -> Self {
        Self { timeout }
    }
}

/// Sends one request and hands back one response. Implementations never
/// retry.
pub trait HttpClient {
    fn create(config: ClientConfig) -> Result<Self, TransportError>
    where
        Self: Sized;

    fn execute(&self, request: Request) -> Result<Response, TransportError>;
}
