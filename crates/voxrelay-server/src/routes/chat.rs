//! Chat Routes - text chat through the agent's system prompt

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};

use super::error_response;
use crate::models::{ChatRequest, ChatResponse, ConversationMessageResponse};
use crate::AppState;

/// Send a chat message to an agent
#[utoipa::path(
    post,
    path = "/api/chat",
    request_body = ChatRequest,
    responses(
        (status = 200, description = "Agent reply", body = ChatResponse),
        (status = 400, description = "No agent selected or empty message"),
        (status = 404, description = "Agent not found"),
        (status = 502, description = "Chat vendor failed"),
        (status = 503, description = "Chat vendor not configured")
    ),
    tag = "Chat"
)]
pub async fn chat(
    State(state): State<AppState>,
    Json(payload): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, (StatusCode, String)> {
    let reply = state
        .chat_service
        .send(&payload.agent_id, &payload.message, payload.session_id)
        .await
        .map_err(error_response)?;

    Ok(Json(ChatResponse {
        response: reply.response,
        session_id: reply.session_id,
    }))
}

/// Stored messages of a chat session, oldest first
#[utoipa::path(
    get,
    path = "/api/conversations/{session_id}",
    params(
        ("session_id" = String, Path, description = "Chat session ID")
    ),
    responses(
        (status = 200, description = "Session messages", body = Vec<ConversationMessageResponse>),
        (status = 500, description = "Internal server error")
    ),
    tag = "Chat"
)]
pub async fn get_conversation(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<Vec<ConversationMessageResponse>>, (StatusCode, String)> {
    let messages = state
        .chat_service
        .history(&session_id)
        .await
        .map_err(error_response)?;

    Ok(Json(messages.into_iter().map(Into::into).collect()))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/chat", post(chat))
        .route("/api/conversations/:session_id", get(get_conversation))
}
