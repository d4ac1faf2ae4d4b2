//! voxrelay API Routes
//!
//! - /api/agents - Agent management
//! - /api/chat - Text chat with an agent
//! - /api/conversations/:session_id - Stored chat history
//! - /api/llm-configs - LLM provider configurations
//! - /api/v1/realtime/session - Ephemeral realtime credential
//! - /api/v1/realtime/negotiate - SDP offer/answer relay

use axum::http::StatusCode;
use voxrelay::DomainError;

pub mod agent;
pub mod chat;
pub mod llm_config;
pub mod realtime;
pub mod swagger;

/// Map a domain error onto the HTTP status the API reports for it
pub fn error_response(err: DomainError) -> (StatusCode, String) {
    let status = match &err {
        DomainError::NotFound { .. } => StatusCode::NOT_FOUND,
        DomainError::Validation(_) => StatusCode::BAD_REQUEST,
        DomainError::Conflict(_) => StatusCode::CONFLICT,
        DomainError::Upstream(_) => StatusCode::BAD_GATEWAY,
        DomainError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        DomainError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };

    if status.is_server_error() {
        tracing::error!("{}", err);
    }

    (status, err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (DomainError::not_found("Agent", "x"), StatusCode::NOT_FOUND),
            (DomainError::validation("bad"), StatusCode::BAD_REQUEST),
            (DomainError::Conflict("dup".into()), StatusCode::CONFLICT),
            (DomainError::upstream("down"), StatusCode::BAD_GATEWAY),
            (DomainError::unavailable("off"), StatusCode::SERVICE_UNAVAILABLE),
            (
                DomainError::Repository("db".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, expected) in cases {
            assert_eq!(error_response(err).0, expected);
        }
    }
}
