//! Turns raw response bodies into structured values
//!
//! Decoding never panics: a missing body and malformed JSON both come back
//! as a [`DecodeError`], and syntax failures are logged once here.

use rsblox_domain::{ApiResponse, DecodeError, RawBody};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::warn;

/// Decode a raw body
///
/// - `None` (no body) is [`DecodeError::Missing`]
/// - an already structured body is returned unchanged
/// - text is parsed as JSON
pub fn decode(raw: Option<&RawBody>) -> Result<Value, DecodeError> {
    match raw {
        None => Err(DecodeError::Missing),
        Some(RawBody::Json(value)) => Ok(value.clone()),
        Some(RawBody::Text(text)) => decode_str(text),
    }
}

/// Parse a JSON document.
pub fn decode_str(text: &str) -> Result<Value, DecodeError> {
    serde_json::from_str(text).map_err(|err| {
        warn!(error = %err, "failed to parse JSON response");
        DecodeError::Syntax(err.to_string())
    })
}

/// Decode whichever body an executor handed back.
pub fn decode_response(response: &ApiResponse) -> Result<Value, DecodeError> {
    decode(response.body())
}

/// Decode a raw body straight into a typed shape.
pub fn decode_as<T: DeserializeOwned>(raw: Option<&RawBody>) -> Result<T, DecodeError> {
    let value = decode(raw)?;
    serde_json::from_value(value).map_err(|err| {
        warn!(error = %err, "decoded JSON does not match the expected shape");
        DecodeError::Syntax(err.to_string())
    })
}
