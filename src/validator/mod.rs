use crate::error::ExecuteError;
use http::Method;


const SUPPORTED_METHODS: [Method; 9] = [
    Method::GET,
    Method::POST,
    Method::PUT,
    Method::DELETE,
    Method::PATCH,
    Method::HEAD,
    Method::OPTIONS,
    Method::TRACE,
    Method::CONNECT,
];

/// Checks `method` against the standard HTTP verbs, ignoring case.
pub fn validate_method(method: &str) -> Result<Method, ExecuteError> {
    if method.is_empty() {
        return Err(ExecuteError::EmptyMethod);
    }
    SUPPORTED_METHODS
        .iter()
        .find(|supported| supported.as_str().eq_ignore_ascii_case(method))
        .cloned()
        .ok_or(ExecuteError::InvalidMethod)
}
