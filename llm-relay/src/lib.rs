//! Chat-completion relay library.
//!
//! Public API:
//! - [`config::default_config::config_chat`]: env-driven [`config::llm_model_config::LlmModelConfig`].
//! - [`services::chat_completion_service::ChatCompletionService`]: one-shot, non-streaming chat call.
//! - [`telemetry`]: formatting layer and filter helpers for the binary's subscriber.

pub mod config;
pub mod error_handler;
pub mod services;
pub mod telemetry;

pub use config::llm_model_config::LlmModelConfig;
pub use error_handler::{RelayError, Result};
pub use services::chat_completion_service::ChatCompletionService;
