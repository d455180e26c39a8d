use crate::model::ResponseBody;
use base64::engine::general_purpose::URL_SAFE;
use base64::Engine;


pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Decides how a response body is carried in the success event. Only an exact
/// `application/json` is passed through; parameters such as `; charset=utf-8`
/// fall back to base64 like every other type.
pub fn classify(content_type: &str, body: Vec<u8>) -> ResponseBody {
    match content_type {
        JSON_CONTENT_TYPE => ResponseBody::Json(body),
        _ => ResponseBody::Base64(URL_SAFE.encode(body)),
    }
}
