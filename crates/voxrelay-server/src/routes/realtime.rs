//! Realtime Routes - Session Relay
//!
//! Credential issuance and SDP offer/answer exchange with the vendor gateway.
//! Vendor responses are passed through unmodified.

use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};

use super::error_response;
use crate::AppState;

const SDP_CONTENT_TYPE: &str = "application/sdp";

fn is_sdp(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .is_some_and(|media_type| media_type.trim().eq_ignore_ascii_case(SDP_CONTENT_TYPE))
}

/// Issue an ephemeral realtime credential
#[utoipa::path(
    post,
    path = "/api/v1/realtime/session",
    responses(
        (status = 200, description = "Vendor credential payload, verbatim", body = serde_json::Value),
        (status = 502, description = "Vendor unreachable or credential malformed"),
        (status = 503, description = "Realtime gateway not configured")
    ),
    tag = "Realtime"
)]
pub async fn create_session(
    State(state): State<AppState>,
) -> Result<Json<serde_json::Value>, (StatusCode, String)> {
    let credential = state
        .session_relay
        .request_credential()
        .await
        .map_err(error_response)?;

    Ok(Json(credential.into_payload()))
}

/// Relay an SDP offer and return the vendor's SDP answer
#[utoipa::path(
    post,
    path = "/api/v1/realtime/negotiate",
    request_body(content = String, description = "SDP offer", content_type = "application/sdp"),
    responses(
        (status = 200, description = "SDP answer", body = String, content_type = "application/sdp"),
        (status = 400, description = "Empty offer"),
        (status = 415, description = "Body is not application/sdp"),
        (status = 502, description = "Vendor rejected the offer or is unreachable"),
        (status = 503, description = "Realtime gateway not configured")
    ),
    tag = "Realtime"
)]
pub async fn negotiate(
    State(state): State<AppState>,
    headers: HeaderMap,
    offer: String,
) -> Result<Response, (StatusCode, String)> {
    if !is_sdp(&headers) {
        return Err((
            StatusCode::UNSUPPORTED_MEDIA_TYPE,
            format!("Expected Content-Type: {}", SDP_CONTENT_TYPE),
        ));
    }

    let answer = state
        .session_relay
        .negotiate(&offer)
        .await
        .map_err(error_response)?;

    Ok(([(header::CONTENT_TYPE, SDP_CONTENT_TYPE)], answer).into_response())
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/v1/realtime/session", post(create_session))
        .route("/api/v1/realtime/negotiate", post(negotiate))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with(content_type: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_str(content_type).unwrap(),
        );
        headers
    }

    #[test]
    fn test_sdp_content_type_detection() {
        assert!(is_sdp(&headers_with("application/sdp")));
        assert!(is_sdp(&headers_with("Application/SDP; charset=utf-8")));
        assert!(!is_sdp(&headers_with("application/json")));
        assert!(!is_sdp(&HeaderMap::new()));
    }
}
