//! Provider dispatch with an ordered model chain.
//!
//! - [`TextGenerator`] is the seam the chat pipeline talks to.
//! - [`LlmDispatcher`] resolves the model chain for one provider and one
//!   caller key, and tries each model in order.
//! - Clients are created per call and dropped afterwards: the key belongs to
//!   the caller, so nothing keyed by it outlives the request.
//!
//! # Example
//! ```no_run
//! use ai_llm_service::{LlmDispatcher, LlmProvider, ProviderSettings, TextGenerator};
//!
//! # async fn run() -> Result<(), ai_llm_service::AiLlmError> {
//! let settings = ProviderSettings::from_env()?;
//! let llm = LlmDispatcher::new(&settings, LlmProvider::Gemini, "AIza...");
//! let text = llm.generate("Convert 5 km to miles", None).await?;
//! println!("{text}");
//! # Ok(()) }
//! ```

use std::future::Future;

use tracing::{debug, warn};

use crate::{
    config::{
        default_config::ProviderSettings, llm_model_config::LlmModelConfig,
        llm_provider::LlmProvider,
    },
    error_handler::{AiLlmError, ConfigError},
    services::{gemini_service::GeminiService, open_ai_service::OpenAiService},
};

/// Anything that turns a prompt into text.
pub trait TextGenerator: Send + Sync {
    /// Generates a reply for `prompt`, with an optional system instruction.
    fn generate(
        &self,
        prompt: &str,
        system: Option<&str>,
    ) -> impl Future<Output = Result<String, AiLlmError>> + Send;
}

/// Generator bound to one provider, one caller key and an ordered model chain.
#[derive(Debug, Clone)]
pub struct LlmDispatcher {
    provider: LlmProvider,
    chain: Vec<LlmModelConfig>,
}

impl LlmDispatcher {
    /// Builds the dispatcher. No client is created until [`TextGenerator::generate`].
    pub fn new(settings: &ProviderSettings, provider: LlmProvider, api_key: &str) -> Self {
        Self {
            provider,
            chain: settings.model_chain(provider, api_key),
        }
    }

    /// Model names in the order they will be tried.
    pub fn models(&self) -> impl Iterator<Item = &str> {
        self.chain.iter().map(|c| c.model.as_str())
    }

    async fn generate_with(
        cfg: &LlmModelConfig,
        prompt: &str,
        system: Option<&str>,
    ) -> Result<String, AiLlmError> {
        match cfg.provider {
            LlmProvider::OpenAI => OpenAiService::new(cfg.clone())?.generate(prompt, system).await,
            LlmProvider::Gemini => GeminiService::new(cfg.clone())?.generate(prompt, system).await,
        }
    }
}

impl TextGenerator for LlmDispatcher {
    async fn generate(&self, prompt: &str, system: Option<&str>) -> Result<String, AiLlmError> {
        let mut last_err: Option<AiLlmError> = None;

        for (i, cfg) in self.chain.iter().enumerate() {
            match Self::generate_with(cfg, prompt, system).await {
                Ok(text) => {
                    debug!(provider = %self.provider, model = %cfg.model, attempt = i + 1, "generation succeeded");
                    return Ok(text);
                }
                Err(err) => {
                    if let Some(next) = self.chain.get(i + 1) {
                        warn!(
                            provider = %self.provider,
                            model = %cfg.model,
                            fallback = %next.model,
                            error = %err,
                            "primary model failed; trying fallback"
                        );
                    }
                    last_err = Some(err);
                }
            }
        }

        let source = last_err.unwrap_or(AiLlmError::Config(ConfigError::EmptyModel));
        Err(AiLlmError::GenerationFailed {
            provider: self.provider,
            source: Box::new(source),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    };

    use axum::{Json, Router, extract::Path, http::StatusCode, response::IntoResponse, routing::post};
    use serde_json::json;

    use super::*;
    use crate::services::test_server;

    fn settings(base: &str) -> ProviderSettings {
        ProviderSettings {
            openai_endpoint: base.into(),
            gemini_endpoint: base.into(),
            timeout_secs: Some(5),
            ..ProviderSettings::default()
        }
    }

    #[tokio::test]
    async fn gemini_falls_back_to_second_model() {
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = calls.clone();
        let app = Router::new().route(
            "/v1beta/models/{call}",
            post(move |Path(call): Path<String>| {
                let seen = seen.clone();
                async move {
                    seen.fetch_add(1, Ordering::SeqCst);
                    if call.starts_with("gemini-2.0-flash") {
                        (StatusCode::INTERNAL_SERVER_ERROR, "boom").into_response()
                    } else {
                        Json(json!({"candidates": [{"content": {"parts": [{"text": call}]}}]}))
                            .into_response()
                    }
                }
            }),
        );
        let base = test_server::spawn(app).await;

        let llm = LlmDispatcher::new(&settings(&base), LlmProvider::Gemini, "AIza");
        let out = llm.generate("hi", None).await.unwrap();

        assert_eq!(out, "gemini-1.5-flash:generateContent");
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn gemini_fails_after_both_models() {
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = calls.clone();
        let app = Router::new().route(
            "/v1beta/models/{call}",
            post(move |Path(call): Path<String>| {
                let seen = seen.clone();
                async move {
                    seen.fetch_add(1, Ordering::SeqCst);
                    (StatusCode::SERVICE_UNAVAILABLE, format!("{call} overloaded"))
                }
            }),
        );
        let base = test_server::spawn(app).await;

        let llm = LlmDispatcher::new(&settings(&base), LlmProvider::Gemini, "AIza");
        let err = llm.generate("hi", None).await.unwrap_err();

        assert_eq!(calls.load(Ordering::SeqCst), 2);
        let AiLlmError::GenerationFailed { provider, source } = &err else {
            panic!("unexpected error: {err}");
        };
        assert_eq!(*provider, LlmProvider::Gemini);
        assert!(matches!(**source, AiLlmError::Provider(_)));
        let msg = err.to_string();
        assert!(msg.starts_with("generation failed for provider gemini: "));
        assert!(msg.contains("gemini-1.5-flash:generateContent overloaded"));
        assert!(!msg.contains("gemini-2.0-flash"));
    }

    #[tokio::test]
    async fn exhausted_chain_reports_last_cause() {
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = calls.clone();
        let app = Router::new().route(
            "/v1/chat/completions",
            post(move || {
                let seen = seen.clone();
                async move {
                    seen.fetch_add(1, Ordering::SeqCst);
                    (StatusCode::TOO_MANY_REQUESTS, "quota exceeded")
                }
            }),
        );
        let base = test_server::spawn(app).await;

        let llm = LlmDispatcher::new(&settings(&base), LlmProvider::OpenAI, "sk-x");
        assert_eq!(llm.models().collect::<Vec<_>>(), vec!["gpt-4.1"]);

        let err = llm.generate("hi", None).await.unwrap_err();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        let msg = err.to_string();
        assert!(msg.starts_with("generation failed for provider openai: "));
        assert!(msg.contains("quota exceeded"));
    }

    #[tokio::test]
    async fn empty_chain_is_a_config_failure() {
        let llm = LlmDispatcher {
            provider: LlmProvider::Gemini,
            chain: Vec::new(),
        };
        let err = llm.generate("hi", None).await.unwrap_err();
        assert!(matches!(
            err,
            AiLlmError::GenerationFailed { ref source, .. }
                if matches!(**source, AiLlmError::Config(ConfigError::EmptyModel))
        ));
    }
}
