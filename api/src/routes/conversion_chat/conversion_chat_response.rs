use contextor::ChatAnswer;
use file_advisor::CommandStep;
use serde::Serialize;

/// Response payload for /api/conversion-chat.
#[derive(Debug, Serialize)]
pub struct ConversionChatResponse {
    /// Markdown answer shown in the chat.
    pub response: String,
    /// Copyable commands extracted from `response`, for file conversions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub steps: Option<Vec<CommandStep>>,
}

impl From<ChatAnswer> for ConversionChatResponse {
    fn from(answer: ChatAnswer) -> Self {
        Self {
            response: answer.response,
            steps: answer.steps,
        }
    }
}
