//! Typed error for the contextor crate.

use ai_llm_service::AiLlmError;
use formula_store::FormulaError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ContextorError {
    /// The provider call (including any fallback) failed.
    #[error(transparent)]
    Llm(#[from] AiLlmError),

    /// The request is missing required input.
    #[error("{0}")]
    Validation(&'static str),

    /// The formula corpus could not be set up.
    #[error(transparent)]
    Formula(#[from] FormulaError),
}
