//! voxrelay API Server
//!
//! Agent CRUD, text chat proxy, and the realtime Session Relay, served by axum.
//! `main.rs` wires Postgres and vendor adapters under Shuttle; tests build the
//! same router over in-memory repositories and fake vendor ports.

use axum::{middleware, routing::get, Json, Router};
use serde::Serialize;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::{OpenApi, ToSchema};
use utoipa_swagger_ui::SwaggerUi;

pub mod adapters;
pub mod application;
pub mod auth;
pub mod config;
pub mod models;
pub mod routes;

use application::{AgentService, ChatService, LlmConfigService, SessionRelay};

/// Application state shared across all routes
#[derive(Clone)]
pub struct AppState {
    pub agent_service: Arc<AgentService>,
    pub llm_config_service: Arc<LlmConfigService>,
    pub chat_service: Arc<ChatService>,
    pub session_relay: Arc<SessionRelay>,
    /// Bearer token required on `/api` routes; `None` disables auth
    pub api_key: Option<Arc<str>>,
}

#[derive(Serialize, ToSchema)]
pub struct HealthCheck {
    status: String,
    message: String,
    version: String,
}

/// Liveness probe
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is up", body = HealthCheck)
    ),
    tag = "Health"
)]
pub async fn health_check() -> Json<HealthCheck> {
    Json(HealthCheck {
        status: "ok".to_string(),
        message: "voxrelay API is running".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Build the full router: public health and docs, authenticated `/api` routes.
pub fn app(state: AppState, cors: CorsLayer) -> Router {
    let protected_routes = Router::new()
        .merge(routes::agent::router())
        .merge(routes::chat::router())
        .merge(routes::llm_config::router())
        .merge(routes::realtime::router())
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth::auth_middleware,
        ));

    let openapi = routes::swagger::ApiDoc::openapi();

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi))
        .route("/health", get(health_check))
        .merge(protected_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
