// src/api/http/chat.rs

use axum::{Json, extract::State};
use tracing::info;

use super::LenientJson;
use crate::api::error::{ApiResult, core_error};
use crate::api::types::{ChatRequest, ChatResponse};
use crate::state::AppState;

pub async fn chat_handler(
    State(state): State<AppState>,
    LenientJson(request): LenientJson<ChatRequest>,
) -> ApiResult<Json<ChatResponse>> {
    info!(
        "Chat request ({} chars)",
        request.message.as_deref().map(|m| m.chars().count()).unwrap_or(0)
    );

    let messages = state
        .dialogue
        .reply(request.message.as_deref())
        .await
        .map_err(|e| core_error("Failed to generate reply", e))?;

    Ok(Json(ChatResponse { messages }))
}
