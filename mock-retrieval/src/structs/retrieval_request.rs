//! Retrieval request with loose, JSON-friendly field coercion.
//!
//! Clients send `{ query, k?, rerank?, rerankK? }` where the optional fields are
//! not reliably typed. Counts accept numbers (truncated toward zero) and numeric
//! strings; anything else counts as 0. Infinite counts saturate, so they end up
//! clamped to the corpus size. `rerank` follows JSON truthiness.

use serde_json::Value;

use crate::errors::retrieval_error::RetrievalError;

pub const DEFAULT_K: i64 = 5;
pub const DEFAULT_RERANK_K: i64 = 3;

#[derive(Debug, Clone, PartialEq)]
pub struct RetrievalRequest {
    /// Query exactly as sent (echoed into document content).
    pub query: String,
    pub k: i64,
    pub rerank: bool,
    pub rerank_k: i64,
}

impl RetrievalRequest {
    /// Plain retrieval request with default knobs.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            k: DEFAULT_K,
            rerank: false,
            rerank_k: DEFAULT_RERANK_K,
        }
    }

    /// Builds a request from a decoded JSON body.
    ///
    /// # Errors
    /// [`RetrievalError::MissingQuery`] when `query` is absent, not a string, or empty.
    pub fn from_value(body: &Value) -> Result<Self, RetrievalError> {
        let query = body
            .get("query")
            .and_then(Value::as_str)
            .filter(|q| !q.is_empty())
            .ok_or(RetrievalError::MissingQuery)?;

        Ok(Self {
            query: query.to_string(),
            k: body.get("k").map(coerce_count).unwrap_or(DEFAULT_K),
            rerank: body.get("rerank").is_some_and(is_truthy),
            rerank_k: body
                .get("rerankK")
                .map(coerce_count)
                .unwrap_or(DEFAULT_RERANK_K),
        })
    }

    /// Effective result limit for this request's mode, never negative.
    pub fn limit(&self) -> usize {
        let raw = if self.rerank { self.rerank_k } else { self.k };
        usize::try_from(raw.max(0)).unwrap_or(usize::MAX)
    }
}

/// Number-ish JSON value to an integer count. Non-numeric input is 0.
///
/// `null` counts as 0 as well: an explicit `"k": null` is not "absent".
pub fn coerce_count(v: &Value) -> i64 {
    let n = match v {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => {
            let t = s.trim();
            if t.is_empty() {
                0.0
            } else {
                t.parse::<f64>().unwrap_or(0.0)
            }
        }
        Value::Bool(true) => 1.0,
        _ => 0.0,
    };
    if n.is_nan() {
        0
    } else if n.is_infinite() {
        if n > 0.0 { i64::MAX } else { i64::MIN }
    } else {
        n.trunc() as i64
    }
}

/// JSON truthiness: `false`, `0`, `""`, `null` are falsy; everything else is truthy.
pub fn is_truthy(v: &Value) -> bool {
    match v {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
