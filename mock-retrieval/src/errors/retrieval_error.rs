//! Unified error type for the mock-retrieval crate.

use thiserror::Error;

/// Errors produced by the mock retrieval module.
#[derive(Debug, Error)]
pub enum RetrievalError {
    // ── Request validation ──────────────────────────────────────────────────
    /// `query` is absent, not a string, or blank.
    #[error("Missing query")]
    MissingQuery,

    // ── Configuration / environment ──────────────────────────────────────────
    /// Failed to parse an environment variable into the expected type.
    #[error("failed to parse env variable: {key} = '{value}'")]
    EnvParse { key: String, value: String },

    /// Configuration combination is invalid.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
