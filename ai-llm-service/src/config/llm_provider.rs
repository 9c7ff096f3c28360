use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error_handler::ConfigError;

/// Represents the provider (backend) used for large language model (LLM) inference.
///
/// ```
/// use ai_llm_service::LlmProvider;
///
/// let p: LlmProvider = "chatgpt".parse().unwrap();
/// assert_eq!(p, LlmProvider::OpenAI);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LlmProvider {
    /// OpenAI chat completions API.
    #[serde(rename = "openai", alias = "chatgpt", alias = "gpt")]
    OpenAI,
    /// Google Gemini `generateContent` API.
    #[serde(alias = "google")]
    Gemini,
}

impl LlmProvider {
    pub fn as_str(self) -> &'static str {
        match self {
            LlmProvider::OpenAI => "openai",
            LlmProvider::Gemini => "gemini",
        }
    }
}

impl fmt::Display for LlmProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LlmProvider {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "openai" | "chatgpt" | "gpt" => Ok(LlmProvider::OpenAI),
            "gemini" | "google" => Ok(LlmProvider::Gemini),
            other => Err(ConfigError::UnsupportedProvider(other.to_string())),
        }
    }
}

/// Picks the provider for one request.
pub struct ProviderSelector;

impl ProviderSelector {
    /// OpenAI secret keys start with this prefix.
    pub const OPENAI_KEY_PREFIX: &'static str = "sk-";

    /// An explicit choice always wins. Without one, keys shaped like OpenAI
    /// secret keys go to OpenAI and everything else to Gemini; the key is
    /// otherwise treated as opaque.
    pub fn resolve(explicit: Option<LlmProvider>, api_key: &str) -> LlmProvider {
        match explicit {
            Some(p) => p,
            None if api_key.starts_with(Self::OPENAI_KEY_PREFIX) => LlmProvider::OpenAI,
            None => LlmProvider::Gemini,
        }
    }
}
