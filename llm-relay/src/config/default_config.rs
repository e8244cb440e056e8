//! Default chat-completion config loaded from environment variables.
//!
//! # Environment variables
//!
//! - `AI_PIPE_TOKEN`    = bearer credential (optional here; the relay refuses to start without it)
//! - `LLM_ENDPOINT`     = chat-completion URL (default [`DEFAULT_ENDPOINT`])
//! - `LLM_MODEL`        = model id (default [`DEFAULT_MODEL`])
//! - `LLM_MAX_TOKENS`   = optional max tokens (u32)
//! - `LLM_TIMEOUT_SECS` = optional request timeout (u64); unset means no timeout

use crate::{
    config::llm_model_config::LlmModelConfig,
    error_handler::{Result, opt_u32, opt_u64, opt_var, validate_http_endpoint},
};

pub const DEFAULT_ENDPOINT: &str = "https://aipipe.org/openai/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
pub const TOKEN_VAR: &str = "AI_PIPE_TOKEN";

/// Builds the chat config from the process environment.
///
/// # Errors
/// See [`config_chat_from`].
pub fn config_chat() -> Result<LlmModelConfig> {
    config_chat_from(|key| std::env::var(key).ok())
}

/// Builds the chat config from an arbitrary key lookup.
///
/// A missing credential is **not** an error at this stage: the caller decides
/// whether the relay can run without it.
///
/// # Errors
/// - [`crate::error_handler::ConfigError::InvalidFormat`] if `LLM_ENDPOINT` lacks an http/https scheme
/// - [`crate::error_handler::ConfigError::InvalidNumber`] if `LLM_MAX_TOKENS` / `LLM_TIMEOUT_SECS` do not parse
pub fn config_chat_from<F>(lookup: F) -> Result<LlmModelConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let endpoint =
        opt_var(&lookup, "LLM_ENDPOINT").unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());
    validate_http_endpoint("LLM_ENDPOINT", &endpoint)?;

    let model = opt_var(&lookup, "LLM_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string());

    Ok(LlmModelConfig {
        model,
        endpoint,
        api_key: opt_var(&lookup, TOKEN_VAR),
        max_tokens: opt_u32(&lookup, "LLM_MAX_TOKENS")?,
        timeout_secs: opt_u64(&lookup, "LLM_TIMEOUT_SECS")?,
    })
}
