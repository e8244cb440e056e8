use axum::body::Bytes;
use serde_json::{Map, Value};

use crate::error_handler::{AppError, AppResult};

/// Decode a request body leniently: an empty body reads as `{}`.
///
/// Content-Type is not enforced, so plain `curl -d` calls work too.
pub fn parse_json_body(bytes: &Bytes) -> AppResult<Value> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Object(Map::new()));
    }
    serde_json::from_slice(bytes).map_err(|e| AppError::BadRequest(format!("invalid JSON body: {e}")))
}
