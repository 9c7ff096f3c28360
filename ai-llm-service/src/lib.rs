//! Shared LLM service for the conversion chat backend.
//!
//! - Two providers: OpenAI chat completions and Google Gemini `generateContent`
//! - Provider choice per request (explicit, or inferred from the key shape)
//! - Ordered model chains with a single fallback for Gemini
//! - Unified error type and a library-scoped tracing layer

pub mod config;
pub mod error_handler;
pub mod service_profiles;
pub mod services;
pub mod telemetry;

pub use config::{
    default_config::ProviderSettings,
    llm_model_config::LlmModelConfig,
    llm_provider::{LlmProvider, ProviderSelector},
};
pub use error_handler::{AiLlmError, ConfigError, ProviderError, ProviderErrorKind};
pub use service_profiles::{LlmDispatcher, TextGenerator};
