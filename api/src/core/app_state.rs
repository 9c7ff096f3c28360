use ai_llm_service::{AiLlmError, ProviderSettings};
use contextor::{ChatPipeline, ContextorConfig, ContextorError};
use thiserror::Error;

/// Startup failure while building [`AppState`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid provider settings: {0}")]
    Provider(#[from] AiLlmError),

    #[error("invalid chat pipeline settings: {0}")]
    Pipeline(#[from] ContextorError),
}

/// Shared state for all HTTP handlers.
///
/// Holds no caller credentials: keys arrive with each request and are
/// dropped with it.
pub struct AppState {
    pub pipeline: ChatPipeline,
    /// Endpoints, models and sampling knobs for both providers.
    pub settings: ProviderSettings,
}

impl AppState {
    pub fn new(pipeline: ChatPipeline, settings: ProviderSettings) -> Self {
        Self { pipeline, settings }
    }

    /// Load shared state from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        let settings = ProviderSettings::from_env()?;
        settings.validate()?;
        let pipeline = ChatPipeline::new(ContextorConfig::from_env())?;
        Ok(Self::new(pipeline, settings))
    }
}
