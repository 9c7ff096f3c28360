use ai_llm_service::LlmProvider;
use contextor::ChatRequest;
use file_advisor::FileInfo;
use formula_store::ConversionContext;
use serde::Deserialize;

use crate::error_handler::AppError;

/// Request payload for /api/conversion-chat.
///
/// `message` and `apiKey` default to empty so that a missing field gets the
/// same 400 as a blank one.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversionChatRequest {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub api_key: String,
    /// `openai` or `gemini` (aliases accepted); inferred from the key when absent.
    #[serde(default)]
    pub provider: Option<String>,
    /// Units picked through /api/unit-selection.
    #[serde(default)]
    pub conversion_context: Option<ConversionContext>,
    #[serde(default)]
    pub file_info: Option<FileInfo>,
}

impl ConversionChatRequest {
    pub fn into_chat_request(self) -> Result<ChatRequest, AppError> {
        let provider = match self.provider.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(name) => Some(
                name.parse::<LlmProvider>()
                    .map_err(|e| AppError::BadRequest(e.to_string()))?,
            ),
        };

        Ok(ChatRequest {
            provider,
            conversion_context: self.conversion_context,
            file_info: self.file_info,
            ..ChatRequest::new(self.message, self.api_key)
        })
    }
}
