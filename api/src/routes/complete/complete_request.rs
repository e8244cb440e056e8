use serde::Serialize;
use serde_json::Value;

use crate::error_handler::{AppError, AppResult};

/// Request payload for /api/complete.
#[derive(Debug)]
pub struct CompleteRequest {
    /// User prompt forwarded verbatim as the single user message.
    pub prompt: String,
}

impl CompleteRequest {
    /// Extract a non-empty string `prompt`; anything else is `Missing prompt`.
    pub fn from_value(body: &Value) -> AppResult<Self> {
        body.get("prompt")
            .and_then(Value::as_str)
            .filter(|p| !p.is_empty())
            .map(|p| Self {
                prompt: p.to_string(),
            })
            .ok_or(AppError::MissingInput("Missing prompt"))
    }
}

/// Response payload for /api/complete.
#[derive(Debug, Serialize)]
pub struct CompleteResponse {
    /// First choice's message content, as returned upstream.
    pub output: String,
}
