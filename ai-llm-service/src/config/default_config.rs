//! Provider settings loaded from environment variables, with defaults.
//!
//! Unlike the API key, which arrives with every request, endpoints and model
//! names are process-wide. Every variable is optional.
//!
//! # Environment variables
//!
//! OpenAI:
//! - `OPENAI_BASE_URL` (default `https://api.openai.com`)
//! - `OPENAI_MODEL`    (default `gpt-4.1`)
//!
//! Gemini:
//! - `GEMINI_BASE_URL`       (default `https://generativelanguage.googleapis.com`)
//! - `GEMINI_MODEL`          (default `gemini-2.0-flash`)
//! - `GEMINI_FALLBACK_MODEL` (default `gemini-1.5-flash`)
//!
//! Common:
//! - `LLM_TEMPERATURE`  (default `0.3`, range `0.0..=2.0`)
//! - `LLM_MAX_TOKENS`   (optional u32)
//! - `LLM_TIMEOUT_SECS` (optional u64; unset means no client-side timeout)

use tracing::debug;

use crate::{
    config::{llm_model_config::LlmModelConfig, llm_provider::LlmProvider},
    error_handler::{
        AiLlmError, ConfigError, env_opt_f32, env_opt_u32, env_opt_u64, env_or,
        validate_http_endpoint, validate_range_f32,
    },
};

pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com";
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4.1";
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.0-flash";
pub const DEFAULT_GEMINI_FALLBACK_MODEL: &str = "gemini-1.5-flash";
pub const DEFAULT_TEMPERATURE: f32 = 0.3;

/// Endpoints, model names and sampling options shared by all requests.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderSettings {
    pub openai_endpoint: String,
    pub openai_model: String,
    pub gemini_endpoint: String,
    pub gemini_model: String,
    /// Tried once after the primary Gemini model fails.
    pub gemini_fallback_model: Option<String>,
    pub temperature: f32,
    pub max_tokens: Option<u32>,
    pub timeout_secs: Option<u64>,
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            openai_endpoint: DEFAULT_OPENAI_BASE_URL.into(),
            openai_model: DEFAULT_OPENAI_MODEL.into(),
            gemini_endpoint: DEFAULT_GEMINI_BASE_URL.into(),
            gemini_model: DEFAULT_GEMINI_MODEL.into(),
            gemini_fallback_model: Some(DEFAULT_GEMINI_FALLBACK_MODEL.into()),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: None,
            timeout_secs: None,
        }
    }
}

impl ProviderSettings {
    /// Builds settings from the environment, falling back to defaults.
    ///
    /// # Errors
    /// - [`ConfigError::InvalidNumber`] for unparsable numeric variables
    /// - [`ConfigError::InvalidFormat`] for endpoints without an http(s) scheme
    /// - [`ConfigError::OutOfRange`] for a temperature outside `0.0..=2.0`
    pub fn from_env() -> Result<Self, AiLlmError> {
        let openai_endpoint = env_or("OPENAI_BASE_URL", DEFAULT_OPENAI_BASE_URL);
        validate_http_endpoint("OPENAI_BASE_URL", &openai_endpoint)?;
        let gemini_endpoint = env_or("GEMINI_BASE_URL", DEFAULT_GEMINI_BASE_URL);
        validate_http_endpoint("GEMINI_BASE_URL", &gemini_endpoint)?;

        let fallback = env_or("GEMINI_FALLBACK_MODEL", DEFAULT_GEMINI_FALLBACK_MODEL);
        let temperature = env_opt_f32("LLM_TEMPERATURE")?.unwrap_or(DEFAULT_TEMPERATURE);
        validate_range_f32("temperature", temperature, 0.0, 2.0)?;

        let settings = Self {
            openai_endpoint,
            openai_model: env_or("OPENAI_MODEL", DEFAULT_OPENAI_MODEL),
            gemini_endpoint,
            gemini_model: env_or("GEMINI_MODEL", DEFAULT_GEMINI_MODEL),
            gemini_fallback_model: Some(fallback),
            temperature,
            max_tokens: env_opt_u32("LLM_MAX_TOKENS")?,
            timeout_secs: env_opt_u64("LLM_TIMEOUT_SECS")?,
        };
        settings.validate()?;

        debug!(
            openai_model = %settings.openai_model,
            gemini_model = %settings.gemini_model,
            gemini_fallback = ?settings.gemini_fallback_model,
            timeout_secs = ?settings.timeout_secs,
            "provider settings loaded"
        );
        Ok(settings)
    }

    /// Rejects empty model names.
    pub fn validate(&self) -> Result<(), AiLlmError> {
        if self.openai_model.trim().is_empty() || self.gemini_model.trim().is_empty() {
            return Err(ConfigError::EmptyModel.into());
        }
        Ok(())
    }

    /// Ordered model configs to try for `provider`.
    ///
    /// OpenAI has a single entry. Gemini has the primary model followed by
    /// the fallback, unless the fallback is unset or names the same model.
    pub fn model_chain(&self, provider: LlmProvider, api_key: &str) -> Vec<LlmModelConfig> {
        let models: Vec<&str> = match provider {
            LlmProvider::OpenAI => vec![self.openai_model.as_str()],
            LlmProvider::Gemini => {
                let mut v = vec![self.gemini_model.as_str()];
                if let Some(fb) = self.gemini_fallback_model.as_deref() {
                    if !fb.trim().is_empty() && fb != self.gemini_model {
                        v.push(fb);
                    }
                }
                v
            }
        };
        let endpoint = match provider {
            LlmProvider::OpenAI => &self.openai_endpoint,
            LlmProvider::Gemini => &self.gemini_endpoint,
        };

        models
            .into_iter()
            .map(|model| LlmModelConfig {
                provider,
                model: model.to_string(),
                endpoint: endpoint.clone(),
                api_key: Some(api_key.to_string()),
                max_tokens: self.max_tokens,
                temperature: Some(self.temperature),
                top_p: None,
                timeout_secs: self.timeout_secs,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn openai_chain_has_one_model() {
        let chain = ProviderSettings::default().model_chain(LlmProvider::OpenAI, "sk-1");
        assert_eq!(chain.len(), 1);
        assert_eq!(chain[0].model, "gpt-4.1");
        assert_eq!(chain[0].endpoint, "https://api.openai.com");
        assert_eq!(chain[0].api_key.as_deref(), Some("sk-1"));
        assert_eq!(chain[0].temperature, Some(0.3));
        assert_eq!(chain[0].timeout_secs, None);
    }

    #[test]
    fn gemini_chain_has_fallback() {
        let chain = ProviderSettings::default().model_chain(LlmProvider::Gemini, "AIza");
        let models: Vec<_> = chain.iter().map(|c| c.model.as_str()).collect();
        assert_eq!(models, vec!["gemini-2.0-flash", "gemini-1.5-flash"]);
        assert!(chain.iter().all(|c| c.provider == LlmProvider::Gemini));
    }

    #[test]
    fn duplicate_or_missing_fallback_is_skipped() {
        let mut s = ProviderSettings::default();
        s.gemini_fallback_model = Some(s.gemini_model.clone());
        assert_eq!(s.model_chain(LlmProvider::Gemini, "k").len(), 1);

        s.gemini_fallback_model = None;
        assert_eq!(s.model_chain(LlmProvider::Gemini, "k").len(), 1);
    }

    #[test]
    fn empty_model_is_rejected() {
        let s = ProviderSettings {
            openai_model: " ".into(),
            ..ProviderSettings::default()
        };
        assert!(matches!(
            s.validate(),
            Err(AiLlmError::Config(ConfigError::EmptyModel))
        ));
    }
}
