use crate::http_client::Body;
use std::io::{self, Read};
use tracing::warn;

/// Owns a response body for the duration of a read and closes it exactly once:
/// through [`ScopedBody::close`] when the caller gets that far, otherwise when
/// the guard is dropped.
pub struct ScopedBody {
    body: Option<Box<dyn Body>>,
}

impl ScopedBody {
    pub fn new(body: Box<dyn Body>) -> Self {
        Self { body: Some(body) }
    }

    pub fn read_to_end(&mut self) -> io::Result<Vec<u8>> {
        let mut content = Vec::new();
        if let Some(body) = self.body.as_mut() {
            body.read_to_end(&mut content)?;
        }
        Ok(content)
    }

    pub fn close(mut self) -> io::Result<()> {
        match self.body.take() {
            Some(mut body) => body.close(),
            None => Ok(()),
        }
    }
}

impl Drop for ScopedBody {
    fn drop(&mut self) {
        if let Some(mut body) = self.body.take() {
            if let Err(err) = body.close() {
                warn!(error = %err, "failed to close response body");
            }
        }
    }
}
