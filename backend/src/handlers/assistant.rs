//! HTTP handler for the admin assistant

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::{
    error::{AppError, AppResult},
    external::ChatMessage,
    AppState,
};

#[derive(Debug, Deserialize)]
pub struct AssistantRequest {
    pub messages: Vec<ChatMessage>,
}

#[derive(Debug, Serialize)]
pub struct AssistantResponse {
    pub response: String,
}

/// Forward the admin conversation to the assistant endpoint
pub async fn ask_assistant(
    State(state): State<AppState>,
    Json(input): Json<AssistantRequest>,
) -> AppResult<Json<AssistantResponse>> {
    let client = state.assistant.as_ref().ok_or_else(|| {
        AppError::ServiceUnavailable("assistant endpoint is not configured".to_string())
    })?;

    let response = client.chat(&input.messages).await?;
    Ok(Json(AssistantResponse { response }))
}
