//! Agent Routes - voice agent management
//!
//! HTTP handlers that delegate to AgentService for business logic.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};

use super::error_response;
use crate::models::{AgentResponse, CreateAgentRequest, MessageResponse, UpdateAgentRequest};
use crate::AppState;

/// List all Agents
#[utoipa::path(
    get,
    path = "/api/agents",
    responses(
        (status = 200, description = "List of all Agents", body = Vec<AgentResponse>),
        (status = 500, description = "Internal server error")
    ),
    tag = "Agent"
)]
pub async fn list_agents(
    State(state): State<AppState>,
) -> Result<Json<Vec<AgentResponse>>, (StatusCode, String)> {
    let agents = state
        .agent_service
        .list_all()
        .await
        .map_err(error_response)?;

    Ok(Json(agents.into_iter().map(Into::into).collect()))
}

/// Create new Agent
#[utoipa::path(
    post,
    path = "/api/agents",
    request_body = CreateAgentRequest,
    responses(
        (status = 200, description = "Agent created successfully", body = AgentResponse),
        (status = 400, description = "Invalid agent"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Agent"
)]
pub async fn create_agent(
    State(state): State<AppState>,
    Json(payload): Json<CreateAgentRequest>,
) -> Result<Json<AgentResponse>, (StatusCode, String)> {
    let agent = state
        .agent_service
        .create(
            payload.name,
            payload.description,
            payload.system_prompt,
            payload.language,
        )
        .await
        .map_err(error_response)?;

    Ok(Json(agent.into()))
}

/// Get Agent by ID
#[utoipa::path(
    get,
    path = "/api/agents/{id}",
    params(
        ("id" = String, Path, description = "Agent ID")
    ),
    responses(
        (status = 200, description = "Agent found", body = AgentResponse),
        (status = 404, description = "Agent not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Agent"
)]
pub async fn get_agent(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<AgentResponse>, (StatusCode, String)> {
    let agent = state
        .agent_service
        .get_by_id(&id)
        .await
        .map_err(error_response)?
        .ok_or((StatusCode::NOT_FOUND, "Agent not found".to_string()))?;

    Ok(Json(agent.into()))
}

/// Update Agent (partial)
#[utoipa::path(
    put,
    path = "/api/agents/{id}",
    params(
        ("id" = String, Path, description = "Agent ID")
    ),
    request_body = UpdateAgentRequest,
    responses(
        (status = 200, description = "Agent updated successfully", body = AgentResponse),
        (status = 400, description = "Invalid update"),
        (status = 404, description = "Agent not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Agent"
)]
pub async fn update_agent(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateAgentRequest>,
) -> Result<Json<AgentResponse>, (StatusCode, String)> {
    let agent = state
        .agent_service
        .update(&id, payload.into())
        .await
        .map_err(|e| match e {
            voxrelay::DomainError::NotFound { .. } => {
                (StatusCode::NOT_FOUND, "Agent not found".to_string())
            }
            other => error_response(other),
        })?;

    Ok(Json(agent.into()))
}

/// Delete Agent
#[utoipa::path(
    delete,
    path = "/api/agents/{id}",
    params(
        ("id" = String, Path, description = "Agent ID")
    ),
    responses(
        (status = 200, description = "Agent deleted successfully", body = MessageResponse),
        (status = 404, description = "Agent not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Agent"
)]
pub async fn delete_agent(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, (StatusCode, String)> {
    let deleted = state
        .agent_service
        .delete(&id)
        .await
        .map_err(error_response)?;

    if !deleted {
        return Err((StatusCode::NOT_FOUND, "Agent not found".to_string()));
    }

    Ok(Json(MessageResponse::new("Agent deleted successfully")))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/agents", get(list_agents).post(create_agent))
        .route(
            "/api/agents/:id",
            get(get_agent).put(update_agent).delete(delete_agent),
        )
}
