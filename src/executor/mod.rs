use crate::classifier::classify;
use crate::error::ExecuteError;
use crate::http_client::{HttpClient, Request, ScopedBody};
use crate::model::{HeaderMultiMap, RequestInput, ResponseOutput};
use crate::validator::validate_method;
use http::header::{HeaderName, HeaderValue, CONTENT_TYPE};
use http::{HeaderMap, Uri};
use tracing::debug;
use url::Url;

#[cfg(test)]
mod tests;

/// Performs the request described by `input` through `client`.
///
/// Nothing is sent when the method or the request itself is invalid. The
/// response body is always closed before returning, and a failure to close it
/// is reported even when the body was read successfully.
pub fn do_request(
    client: &dyn HttpClient,
    input: &RequestInput,
) -> Result<ResponseOutput, ExecuteError> {
    let request = build_request(input)?;

    let response = client.execute(request)?;
    let (parts, body) = response.into_parts();

    let mut body = ScopedBody::new(body);
    let content = body
        .read_to_end()
        .map_err(|source| ExecuteError::BodyRead { source })?;
    body.close()
        .map_err(|source| ExecuteError::BodyClose { source })?;
    debug!(status = %parts.status, bytes = content.len(), "read response body");

    let content_type = parts
        .headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();

    Ok(ResponseOutput {
        status_code: parts.status.as_u16(),
        body: classify(content_type, content),
        header: header_multimap(&parts.headers),
    })
}

pub(crate) fn build_request(input: &RequestInput) -> Result<Request, ExecuteError> {
    let method = validate_method(&input.method)?;
    let uri = parse_target(&input.url)?;

    let mut builder = http::Request::builder().method(method).uri(uri);
    for (name, values) in &input.headers {
        let header_name = HeaderName::from_bytes(name.as_bytes()).map_err(|e| {
            ExecuteError::RequestConstruction(format!("invalid header name {:?}: {}", name, e))
        })?;
        for value in values {
            let header_value = HeaderValue::from_str(value).map_err(|e| {
                ExecuteError::RequestConstruction(format!(
                    "invalid value for header {:?}: {}",
                    name, e
                ))
            })?;
            builder = builder.header(header_name.clone(), header_value);
        }
    }

    builder
        .body(input.body.clone().into_bytes())
        .map_err(|e| ExecuteError::RequestConstruction(format!("invalid request: {}", e)))
}

fn parse_target(url: &str) -> Result<Uri, ExecuteError> {
    if !has_scheme(url) {
        return Err(ExecuteError::RequestConstruction(format!(
            "parse {:?}: missing protocol scheme",
            url
        )));
    }
    // the transport works on `url::Url`, reject what it would refuse here
    let invalid = |e: &dyn std::fmt::Display| {
        ExecuteError::RequestConstruction(format!("parse {:?}: {}", url, e))
    };
    Url::parse(url).map_err(|e| invalid(&e))?;
    url.parse::<Uri>().map_err(|e| invalid(&e))
}

fn has_scheme(url: &str) -> bool {
    let scheme = match url.split_once(':') {
        Some((scheme, _)) => scheme,
        None => return false,
    };
    let mut chars = scheme.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() => {
            chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
        }
        _ => false,
    }
}

fn header_multimap(headers: &HeaderMap) -> HeaderMultiMap {
    let mut multimap = HeaderMultiMap::new();
    for name in headers.keys() {
        let values = headers
            .get_all(name)
            .iter()
            .map(|value| String::from_utf8_lossy(value.as_bytes()).into_owned())
            .collect();
        multimap.insert(canonical_header_key(name.as_str()), values);
    }
    multimap
}

/// `content-type` -> `Content-Type`
pub(crate) fn canonical_header_key(name: &str) -> String {
    let mut upper = true;
    name.chars()
        .map(|c| {
            let converted = if upper {
                c.to_ascii_uppercase()
            } else {
                c.to_ascii_lowercase()
            };
            upper = c == '-';
            converted
        })
        .collect()
}
