use std::sync::Arc;

use llm_relay::{ChatCompletionService, LlmModelConfig, config::default_config};
use mock_retrieval::RetrievalConfig;
use tracing::{info, warn};

use crate::error_handler::AppError;

/// Shared state for all HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    /// Completion client; `None` when no credential was configured.
    pub relay: Option<Arc<ChatCompletionService>>,
    /// Configuration for the upstream chat-completion API.
    pub llm_config: LlmModelConfig,
    /// Mock corpus and scoring settings.
    pub retrieval: RetrievalConfig,
}

impl AppState {
    /// Load shared state from environment variables.
    pub fn from_env() -> Result<Self, AppError> {
        let llm_config =
            default_config::config_chat().map_err(|e| AppError::Config(e.to_string()))?;
        let retrieval = RetrievalConfig::from_env().map_err(|e| AppError::Config(e.to_string()))?;
        Self::new(llm_config, retrieval)
    }

    /// Build state from explicit configs.
    ///
    /// A missing credential leaves the relay disabled instead of failing startup,
    /// so the retrieval endpoints stay available.
    pub fn new(llm_config: LlmModelConfig, retrieval: RetrievalConfig) -> Result<Self, AppError> {
        let relay = if llm_config.has_credentials() {
            let svc = ChatCompletionService::new(llm_config.clone())
                .map_err(|e| AppError::Config(e.to_string()))?;
            Some(Arc::new(svc))
        } else {
            warn!(
                var = default_config::TOKEN_VAR,
                "no upstream credential configured; completion relay is disabled"
            );
            None
        };

        info!(
            relay_enabled = relay.is_some(),
            model = %llm_config.model,
            endpoint = %llm_config.endpoint,
            total_docs = retrieval.total_docs,
            "app state ready"
        );

        Ok(Self {
            relay,
            llm_config,
            retrieval,
        })
    }
}
