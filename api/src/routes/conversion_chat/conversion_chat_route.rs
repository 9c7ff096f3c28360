//! POST /api/conversion-chat — answers one chat turn.

use std::sync::Arc;

use ai_llm_service::{LlmDispatcher, ProviderSelector};
use axum::{Json, extract::State};
use tracing::{info, instrument};

use crate::{
    core::app_state::AppState,
    error_handler::AppResult,
    routes::conversion_chat::{
        conversion_chat_request::ConversionChatRequest,
        conversion_chat_response::ConversionChatResponse,
    },
};

/// Handler: POST /api/conversion-chat
///
/// # Example
/// ```bash
/// curl -X POST http://127.0.0.1:3000/api/conversion-chat \
///   -H 'content-type: application/json' \
///   -d '{"message":"convert 5 km to miles","apiKey":"AIza..."}'
/// ```
#[instrument(
    name = "conversion_chat_route",
    skip_all,
    fields(has_file = body.file_info.is_some(), provider = tracing::field::Empty)
)]
pub async fn conversion_chat(
    State(state): State<Arc<AppState>>,
    Json(body): Json<ConversionChatRequest>,
) -> AppResult<Json<ConversionChatResponse>> {
    let req = body.into_chat_request()?;

    let provider = ProviderSelector::resolve(req.provider, &req.api_key);
    tracing::Span::current().record("provider", provider.as_str());
    let llm = LlmDispatcher::new(&state.settings, provider, &req.api_key);

    let answer = state.pipeline.answer(&req, &llm).await?;
    info!(template = ?answer.template, steps = answer.steps.as_ref().map_or(0, Vec::len), "chat answered");

    Ok(Json(answer.into()))
}
