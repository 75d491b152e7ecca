//! Request body decoding
//!
//! Bodies are read as JSON objects. A request without a JSON content type,
//! an empty body, or a JSON value that is not an object decodes as an empty
//! object, so field validation reports what is missing.

use crate::error::AppError;
use axum::http::{header, HeaderMap};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Decode `body` as a JSON object into `T`
///
/// Only malformed JSON sent with a JSON content type is an error.
pub fn json_object<T>(headers: &HeaderMap, body: &[u8]) -> Result<T, AppError>
where
    T: DeserializeOwned + Default,
{
    if !is_json(headers) || body.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }

    let value: Value =
        serde_json::from_slice(body).map_err(|e| AppError::InvalidBody(e.to_string()))?;

    match value {
        Value::Object(map) => serde_json::from_value(Value::Object(map))
            .map_err(|e| AppError::InvalidBody(e.to_string())),
        _ => Ok(T::default()),
    }
}

fn is_json(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .is_some_and(|mime| mime.trim().eq_ignore_ascii_case("application/json"))
}
