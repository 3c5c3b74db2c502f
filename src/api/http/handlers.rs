// src/api/http/handlers.rs

use axum::{Json, extract::State};
use serde_json::Value;

use crate::api::error::{ApiResult, IntoApiError};
use crate::state::AppState;

/// Liveness check
pub async fn root_handler() -> &'static str {
    "Hello World!"
}

/// Speech provider's voice catalog, proxied as-is
pub async fn voices_handler(State(state): State<AppState>) -> ApiResult<Json<Value>> {
    let voices = state.speech.voices().await.into_api_error("Failed to fetch voices")?;
    Ok(Json(voices))
}
