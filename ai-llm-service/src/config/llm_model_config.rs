use std::fmt;

use crate::config::llm_provider::LlmProvider;

/// Configuration for an LLM model invocation.
///
/// # Fields
///
/// - `provider`: Which LLM provider/backend to use (OpenAI or Gemini).
/// - `model`: The model identifier (e.g., `"gpt-4.1"`, `"gemini-2.0-flash"`).
/// - `endpoint`: Base URL of the API; request paths are appended by each client.
/// - `api_key`: The caller's key. Required by both providers.
/// - `max_tokens`: Maximum number of tokens to generate (if supported).
/// - `temperature`: Controls randomness (0.0 = deterministic, >1.0 = more random).
/// - `top_p`: Nucleus sampling cutoff (alternative to temperature).
/// - `timeout_secs`: Optional request timeout in seconds; `None` means no timeout.
///
/// # Examples
///
/// ```
/// use ai_llm_service::{LlmModelConfig, LlmProvider};
///
/// let cfg = LlmModelConfig {
///     provider: LlmProvider::OpenAI,
///     model: "gpt-4.1".to_string(),
///     endpoint: "https://api.openai.com".to_string(),
///     api_key: Some("sk-...".to_string()),
///     max_tokens: None,
///     temperature: Some(0.3),
///     top_p: None,
///     timeout_secs: None,
/// };
/// assert!(!format!("{cfg:?}").contains("sk-..."));
/// ```
#[derive(Clone, PartialEq)]
pub struct LlmModelConfig {
    /// The LLM provider/backend.
    pub provider: LlmProvider,

    /// Model identifier string.
    pub model: String,

    /// Base API URL.
    pub endpoint: String,

    /// API key for authentication. Never printed by `Debug`.
    pub api_key: Option<String>,

    /// Maximum number of tokens to generate.
    pub max_tokens: Option<u32>,

    /// Sampling temperature (controls creativity).
    pub temperature: Option<f32>,

    /// Nucleus sampling parameter.
    pub top_p: Option<f32>,

    /// Optional request timeout (in seconds).
    pub timeout_secs: Option<u64>,
}

impl fmt::Debug for LlmModelConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LlmModelConfig")
            .field("provider", &self.provider)
            .field("model", &self.model)
            .field("endpoint", &self.endpoint)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("max_tokens", &self.max_tokens)
            .field("temperature", &self.temperature)
            .field("top_p", &self.top_p)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}
