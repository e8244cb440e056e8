/// Configuration for a chat-completion upstream.
///
/// # Fields
///
/// - `model`: The model identifier sent with every request (e.g., `"gpt-4o-mini"`).
/// - `endpoint`: Full chat-completion URL the relay POSTs to.
/// - `api_key`: Bearer credential; the relay cannot be built without it.
/// - `max_tokens`: Maximum number of tokens to generate (if supported).
/// - `timeout_secs`: Optional request timeout in seconds. `None` waits indefinitely.
///
/// # Examples
///
/// ```
/// use llm_relay::config::llm_model_config::LlmModelConfig;
///
/// let cfg = LlmModelConfig {
///     model: "gpt-4o-mini".to_string(),
///     endpoint: "https://aipipe.org/openai/v1/chat/completions".to_string(),
///     api_key: Some("token".to_string()),
///     max_tokens: None,
///     timeout_secs: None,
/// };
/// assert!(cfg.has_credentials());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct LlmModelConfig {
    /// Model identifier string.
    pub model: String,

    /// Chat-completion URL.
    pub endpoint: String,

    /// Bearer token for the upstream.
    pub api_key: Option<String>,

    /// Maximum number of tokens to generate.
    pub max_tokens: Option<u32>,

    /// Optional request timeout (in seconds).
    pub timeout_secs: Option<u64>,
}

impl LlmModelConfig {
    /// True when a non-empty bearer credential is present.
    pub fn has_credentials(&self) -> bool {
        self.api_key.as_deref().is_some_and(|k| !k.trim().is_empty())
    }
}
