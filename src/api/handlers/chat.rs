//! Chat endpoint.

use crate::{
    types::{AppError, ChatRequest, ChatResponse, Result},
    AppState,
};
use axum::{extract::State, Json};
use uuid::Uuid;

/// Welcome/health endpoint.
pub async fn root() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "message": "Welcome to Colbert API" }))
}

/// Chat with the assistant.
///
/// Generates a session ID when the client did not supply one, so a
/// follow-up request can continue the conversation.
pub async fn chat(
    State(state): State<AppState>,
    Json(payload): Json<ChatRequest>,
) -> Result<Json<ChatResponse>> {
    if payload.message.trim().is_empty() {
        return Err(AppError::InvalidInput("message must not be empty".to_string()));
    }

    let session_id = payload
        .session_id
        .filter(|id| !id.trim().is_empty())
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    let outcome = state.agent.ask(&payload.message, &session_id).await;

    Ok(Json(ChatResponse {
        answer: outcome.answer,
        session_id,
        sources: outcome.sources,
    }))
}
