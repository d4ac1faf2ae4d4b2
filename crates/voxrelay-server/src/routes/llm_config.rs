//! LLM Config Routes

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get},
    Json, Router,
};

use super::error_response;
use crate::models::{CreateLlmConfigRequest, LlmConfigResponse, MessageResponse};
use crate::AppState;

/// List stored LLM configurations (keys masked)
#[utoipa::path(
    get,
    path = "/api/llm-configs",
    responses(
        (status = 200, description = "Stored configurations", body = Vec<LlmConfigResponse>),
        (status = 500, description = "Internal server error")
    ),
    tag = "LlmConfig"
)]
pub async fn list_llm_configs(
    State(state): State<AppState>,
) -> Result<Json<Vec<LlmConfigResponse>>, (StatusCode, String)> {
    let configs = state
        .llm_config_service
        .list_all()
        .await
        .map_err(error_response)?;

    Ok(Json(configs.into_iter().map(Into::into).collect()))
}

/// Store an LLM configuration
#[utoipa::path(
    post,
    path = "/api/llm-configs",
    request_body = CreateLlmConfigRequest,
    responses(
        (status = 200, description = "Configuration stored", body = LlmConfigResponse),
        (status = 400, description = "Unknown provider or missing field"),
        (status = 500, description = "Internal server error")
    ),
    tag = "LlmConfig"
)]
pub async fn create_llm_config(
    State(state): State<AppState>,
    Json(payload): Json<CreateLlmConfigRequest>,
) -> Result<Json<LlmConfigResponse>, (StatusCode, String)> {
    let config = state
        .llm_config_service
        .create(&payload.provider, payload.api_key, payload.model_name)
        .await
        .map_err(error_response)?;

    Ok(Json(config.into()))
}

/// Delete an LLM configuration
#[utoipa::path(
    delete,
    path = "/api/llm-configs/{id}",
    params(
        ("id" = String, Path, description = "LLM config ID")
    ),
    responses(
        (status = 200, description = "Configuration deleted", body = MessageResponse),
        (status = 404, description = "Configuration not found")
    ),
    tag = "LlmConfig"
)]
pub async fn delete_llm_config(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, (StatusCode, String)> {
    let deleted = state
        .llm_config_service
        .delete(&id)
        .await
        .map_err(error_response)?;

    if !deleted {
        return Err((StatusCode::NOT_FOUND, "Config not found".to_string()));
    }

    Ok(Json(MessageResponse::new("Config deleted successfully")))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/llm-configs", get(list_llm_configs).post(create_llm_config))
        .route("/api/llm-configs/:id", delete(delete_llm_config))
}
