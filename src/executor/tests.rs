use crate::error::{ExecuteError, TransportError};
use crate::executor::{build_request, canonical_header_key, do_request};
use crate::http_client::{Body, ClientConfig, HttpClient, Request, Response};
use crate::model::{RequestInput, ResponseBody};
use std::cell::RefCell;
use std::io::{self, Cursor, Read};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

struct FakeBody {
    content: Cursor<Vec<u8>>,
    fail_read: bool,
    fail_close: bool,
    closed: Arc<AtomicUsize>,
}

impl Read for FakeBody {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.fail_read {
            return Err(io::Error::new(io::ErrorKind::ConnectionReset, "read failed"));
        }
        self.content.read(buf)
    }
}

impl Body for FakeBody {
    fn close(&mut self) -> io::Result<()> {
        self.closed.fetch_add(1, Ordering::SeqCst);
        if self.fail_close {
            return Err(io::Error::new(io::ErrorKind::Other, "close failed"));
        }
        Ok(())
    }
}

#[derive(Default)]
struct FakeHttpClient {
    content_type: Option<&'static str>,
    content: Vec<u8>,
    fail_read: bool,
    fail_close: bool,
    transport_error: Option<fn() -> TransportError>,
    closed: Arc<AtomicUsize>,
    sent: RefCell<Vec<Request>>,
}

impl HttpClient for FakeHttpClient {
    fn create(_config: ClientConfig) -> Result<Self, TransportError> {
        Ok(FakeHttpClient::default())
    }

    fn execute(&self, request: Request) -> Result<Response, TransportError> {
        self.sent.borrow_mut().push(request);
        if let Some(error) = self.transport_error {
            return Err(error());
        }
        let body: Box<dyn Body> = Box::new(FakeBody {
            content: Cursor::new(self.content.clone()),
            fail_read: self.fail_read,
            fail_close: self.fail_close,
            closed: self.closed.clone(),
        });
        let mut builder = http::Response::builder().status(200);
        if let Some(content_type) = self.content_type {
            builder = builder.header("content-type", content_type);
        }
        Ok(builder.body(body).unwrap())
    }
}

fn refused() -> TransportError {
    TransportError::Connect("connection refused".to_string())
}

fn input(method: &str, url: &str) -> RequestInput {
    RequestInput {
        method: method.to_string(),
        url: url.to_string(),
        ..RequestInput::default()
    }
}

#[test]
fn test_invalid_method_sends_nothing() {
    let client = FakeHttpClient::default();

    let err = do_request(&client, &input("INVALIDMETHOD", "http://example.com")).unwrap_err();

    assert!(matches!(err, ExecuteError::InvalidMethod));
    assert!(client.sent.borrow().is_empty());
}

#[test]
fn test_empty_method_sends_nothing() {
    let client = FakeHttpClient::default();

    let err = do_request(&client, &RequestInput::default()).unwrap_err();

    assert_eq!("no method provided", err.to_string());
    assert!(client.sent.borrow().is_empty());
}

#[test]
fn test_missing_scheme() {
    let client = FakeHttpClient::default();

    let err = do_request(&client, &input("GET", "://")).unwrap_err();

    assert!(matches!(err, ExecuteError::RequestConstruction(_)));
    assert!(err.to_string().contains("missing protocol scheme"));
    assert!(client.sent.borrow().is_empty());
}

#[test]
fn test_url_without_scheme_is_rejected() {
    for url in &["example.com/path", "", "1http://example.com"] {
        let err = build_request(&input("GET", url)).unwrap_err();
        assert!(err.to_string().contains("missing protocol scheme"), "{}", url);
    }
}

#[test]
fn test_invalid_header_name() {
    let mut request = input("GET", "http://example.com");
    request
        .headers
        .insert("Bad Header".to_string(), vec!["x".to_string()]);

    let err = build_request(&request).unwrap_err();

    assert!(matches!(err, ExecuteError::RequestConstruction(_)));
}

#[test]
fn test_request_is_built_from_input() {
    let client = FakeHttpClient::default();
    let mut request = input("post", "http://example.com/testuri");
    request.body = "The Body!".to_string();
    request
        .headers
        .insert("X-A".to_string(), vec!["1".to_string(), "2".to_string()]);
    request
        .headers
        .insert("X-Another-Header".to_string(), vec!["Is Present".to_string()]);

    do_request(&client, &request).unwrap();

    let sent = client.sent.borrow();
    let sent = &sent[0];
    assert_eq!(http::Method::POST, *sent.method());
    assert_eq!("http://example.com/testuri", sent.uri().to_string());
    assert_eq!(b"The Body!".to_vec(), *sent.body());
    let values: Vec<_> = sent
        .headers()
        .get_all("x-a")
        .iter()
        .map(|value| value.to_str().unwrap())
        .collect();
    assert_eq!(vec!["1", "2"], values);
    assert_eq!("Is Present", sent.headers()["x-another-header"].to_str().unwrap());
}

#[test]
fn test_json_response() {
    let client = FakeHttpClient {
        content_type: Some("application/json"),
        content: br#"{"canned":"response"}"#.to_vec(),
        ..FakeHttpClient::default()
    };

    let output = do_request(&client, &input("GET", "http://example.com")).unwrap();

    assert_eq!(200, output.status_code);
    assert_eq!(
        ResponseBody::Json(br#"{"canned":"response"}"#.to_vec()),
        output.body
    );
    assert_eq!(
        Some(&vec!["application/json".to_string()]),
        output.header.get("Content-Type")
    );
    assert_eq!(1, client.closed.load(Ordering::SeqCst));
}

#[test]
fn test_text_response() {
    let client = FakeHttpClient {
        content_type: Some("text/plain"),
        content: b"The Body".to_vec(),
        ..FakeHttpClient::default()
    };

    let output = do_request(&client, &input("GET", "http://example.com")).unwrap();

    assert_eq!(ResponseBody::Base64("VGhlIEJvZHk=".to_string()), output.body);
}

#[test]
fn test_transport_error_is_propagated() {
    let client = FakeHttpClient {
        transport_error: Some(refused as fn() -> TransportError),
        ..FakeHttpClient::default()
    };

    let err = do_request(&client, &input("GET", "http://example.com")).unwrap_err();

    assert!(matches!(
        err,
        ExecuteError::Transport(TransportError::Connect(_))
    ));
    assert_eq!(1, client.sent.borrow().len());
}

#[test]
fn test_read_failure_still_closes_body() {
    let client = FakeHttpClient {
        fail_read: true,
        ..FakeHttpClient::default()
    };

    let err = do_request(&client, &input("GET", "http://example.com")).unwrap_err();

    assert!(matches!(err, ExecuteError::BodyRead { .. }));
    assert_eq!(1, client.closed.load(Ordering::SeqCst));
}

#[test]
fn test_close_failure_wins_over_successful_read() {
    let client = FakeHttpClient {
        content_type: Some("application/json"),
        content: b"{}".to_vec(),
        fail_close: true,
        ..FakeHttpClient::default()
    };

    let err = do_request(&client, &input("GET", "http://example.com")).unwrap_err();

    assert!(matches!(err, ExecuteError::BodyClose { .. }));
    assert_eq!(1, client.closed.load(Ordering::SeqCst));
}

#[test]
fn test_read_failure_is_reported_over_close_failure() {
    let client = FakeHttpClient {
        fail_read: true,
        fail_close: true,
        ..FakeHttpClient::default()
    };

    let err = do_request(&client, &input("GET", "http://example.com")).unwrap_err();

    assert!(matches!(err, ExecuteError::BodyRead { .. }));
    assert_eq!(1, client.closed.load(Ordering::SeqCst));
}

#[test]
fn test_canonical_header_key() {
    assert_eq!("Content-Type", canonical_header_key("content-type"));
    assert_eq!("X-Random-Value", canonical_header_key("x-RANDOM-value"));
    assert_eq!("Etag", canonical_header_key("etag"));
}

#[test]
fn test_malformed_url_is_rejected_before_sending() {
    let client = FakeHttpClient::default();

    for url in &["http://example.com:99999", "http://exa mple.com", "http://[::1"] {
        let err = do_request(&client, &input("GET", url)).unwrap_err();
        assert!(matches!(err, ExecuteError::RequestConstruction(_)), "{}", url);
        assert!(err.to_string().starts_with("parse "), "{}", url);
    }
    assert!(client.sent.borrow().is_empty());
}
