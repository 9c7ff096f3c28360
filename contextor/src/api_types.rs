//! Public API types re-used by external crates (e.g., the HTTP API layer).

use ai_llm_service::LlmProvider;
use file_advisor::{CommandStep, FileInfo};
use formula_store::ConversionContext;

use crate::prompt::PromptKind;

/// One chat turn as received from a client.
///
/// # Example
/// ```
/// use contextor::ChatRequest;
/// let req = ChatRequest::new("convert 5 km to miles", "sk-test");
/// assert!(req.file_info.is_none());
/// ```
#[derive(Clone, Debug)]
pub struct ChatRequest {
    pub message: String,
    pub api_key: String,
    /// Explicit provider; inferred from the key when absent.
    pub provider: Option<LlmProvider>,
    pub conversion_context: Option<ConversionContext>,
    pub file_info: Option<FileInfo>,
}

impl ChatRequest {
    pub fn new(message: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            api_key: api_key.into(),
            provider: None,
            conversion_context: None,
            file_info: None,
        }
    }
}

/// Final reply of the pipeline.
#[derive(Clone, Debug, PartialEq)]
pub struct ChatAnswer {
    pub response: String,
    /// Copyable command steps, for file-conversion replies that contain any.
    pub steps: Option<Vec<CommandStep>>,
    /// Template sent to the provider; `None` when no provider was called.
    pub template: Option<PromptKind>,
}

impl ChatAnswer {
    pub(crate) fn canned(response: String) -> Self {
        Self {
            steps: steps_of(&response),
            response,
            template: None,
        }
    }

    pub(crate) fn generated(response: String, template: PromptKind) -> Self {
        let steps = match template {
            PromptKind::FileRefinement | PromptKind::FileHelp => steps_of(&response),
            _ => None,
        };
        Self {
            response,
            steps,
            template: Some(template),
        }
    }
}

fn steps_of(text: &str) -> Option<Vec<CommandStep>> {
    let steps = file_advisor::parse_command_steps(text);
    (!steps.is_empty()).then_some(steps)
}
