//! reqwest adapters against a local axum stub standing in for the vendor.

use axum::{
    extract::{Query, State},
    http::{header, HeaderMap, StatusCode},
    response::IntoResponse,
    routing::post,
    Json, Router,
};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use voxrelay::{ChatMessage, ChatProvider, CompletionOptions, DomainError, RealtimeGateway};
use voxrelay_server::{
    adapters::{GeminiChatProvider, OpenAiRealtimeGateway},
    config::RealtimeSettings,
};

const ANSWER: &str = "v=0\r\no=- 1 1 IN IP4 0.0.0.0\r\ns=-\r\nt=0 0\r\n";

#[derive(Default)]
struct Seen {
    session_bodies: Vec<Value>,
    offers: Vec<(String, String)>,
    authorization: Vec<String>,
}

type Shared = Arc<Mutex<Seen>>;

fn bearer(headers: &HeaderMap) -> String {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

async fn sessions(
    State(seen): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Json<Value> {
    let mut seen = seen.lock().unwrap();
    seen.authorization.push(bearer(&headers));
    seen.session_bodies.push(body);
    Json(json!({
        "id": "sess_stub",
        "model": "gpt-4o-realtime-preview-2024-12-17",
        "client_secret": {"value": "ek_stub", "expires_at": 1735689600}
    }))
}

async fn realtime(
    State(seen): State<Shared>,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
    offer: String,
) -> impl IntoResponse {
    let mut seen = seen.lock().unwrap();
    seen.authorization.push(bearer(&headers));
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    seen.offers.push((query.get("model").cloned().unwrap_or_default(), offer));

    if content_type != "application/sdp" {
        return (StatusCode::UNSUPPORTED_MEDIA_TYPE, String::new()).into_response();
    }
    ([(header::CONTENT_TYPE, "application/sdp")], ANSWER).into_response()
}

async fn failing() -> impl IntoResponse {
    (StatusCode::UNAUTHORIZED, r#"{"error":{"message":"bad key"}}"#)
}

async fn spawn(router: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    addr
}

async fn stub_vendor() -> (SocketAddr, Shared) {
    let seen: Shared = Arc::new(Mutex::new(Seen::default()));
    let router = Router::new()
        .route("/v1/realtime/sessions", post(sessions))
        .route("/v1/realtime", post(realtime))
        .with_state(seen.clone());
    (spawn(router).await, seen)
}

fn settings(addr: SocketAddr) -> RealtimeSettings {
    RealtimeSettings {
        base_url: format!("http://{addr}/v1"),
        model: "gpt-4o-realtime-preview-2024-12-17".to_string(),
        voice: "verse".to_string(),
    }
}

#[tokio::test]
async fn test_session_request_carries_model_voice_and_key() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    let (addr, seen) = stub_vendor().await;
    let gateway = OpenAiRealtimeGateway::new("sk-server", settings(addr));

    let credential = gateway.create_session().await.unwrap();

    assert_eq!(credential.secret(), "ek_stub");
    assert!(credential.expires_at().is_some());
    let seen = seen.lock().unwrap();
    assert_eq!(
        seen.session_bodies,
        vec![json!({"model": "gpt-4o-realtime-preview-2024-12-17", "voice": "verse"})]
    );
    assert_eq!(seen.authorization, vec!["Bearer sk-server".to_string()]);
}

#[tokio::test]
async fn test_offer_posted_as_sdp_with_model_query() {
    let (addr, seen) = stub_vendor().await;
    let gateway = OpenAiRealtimeGateway::new("sk-server", settings(addr));

    let answer = gateway.negotiate("v=0\r\n").await.unwrap();

    assert_eq!(answer, ANSWER);
    let seen = seen.lock().unwrap();
    assert_eq!(
        seen.offers,
        vec![(
            "gpt-4o-realtime-preview-2024-12-17".to_string(),
            "v=0\r\n".to_string()
        )]
    );
}

#[tokio::test]
async fn test_vendor_error_status_is_upstream() {
    let router = Router::new()
        .route("/v1/realtime/sessions", post(failing))
        .route("/v1/realtime", post(failing));
    let addr = spawn(router).await;
    let gateway = OpenAiRealtimeGateway::new("sk-bad", settings(addr));

    let err = gateway.negotiate("v=0\r\n").await.unwrap_err();
    assert!(matches!(&err, DomainError::Upstream(msg) if msg.contains("401")));

    let err = gateway.create_session().await.unwrap_err();
    assert!(matches!(err, DomainError::Upstream(_)));
}

#[tokio::test]
async fn test_unreachable_vendor_is_upstream() {
    // Bind then drop to get a port nothing listens on.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let gateway = OpenAiRealtimeGateway::new("sk-server", settings(addr));
    let err = gateway.create_session().await.unwrap_err();
    assert!(matches!(err, DomainError::Upstream(_)));
}

async fn generate_content(headers: HeaderMap, Json(body): Json<Value>) -> impl IntoResponse {
    if headers.get("x-goog-api-key").and_then(|v| v.to_str().ok()) != Some("gm-key") {
        return (StatusCode::FORBIDDEN, Json(json!({"error": "bad key"}))).into_response();
    }
    let system = body["systemInstruction"]["parts"][0]["text"]
        .as_str()
        .unwrap_or_default()
        .to_string();
    Json(json!({
        "candidates": [{
            "content": {"role": "model", "parts": [{"text": "Ji, "}, {"text": system}]},
            "finishReason": "STOP"
        }],
        "usageMetadata": {"promptTokenCount": 12, "candidatesTokenCount": 4, "totalTokenCount": 16}
    }))
    .into_response()
}

#[tokio::test]
async fn test_gemini_completion_joins_parts() {
    let addr = spawn(Router::new().route("/models/*rest", post(generate_content))).await;
    let provider =
        GeminiChatProvider::new("gm-key").with_base_url(format!("http://{addr}/models"));

    let response = provider
        .complete(
            &[ChatMessage::system("order noted"), ChatMessage::user("2 pizzas")],
            &CompletionOptions::default(),
        )
        .await
        .unwrap();

    assert_eq!(response.content, "Ji, order noted");
    assert_eq!(response.usage.total_tokens, 16);
    assert_eq!(response.finish_reason.as_deref(), Some("STOP"));
    assert_eq!(response.model, "gemini-2.0-flash");
}

#[tokio::test]
async fn test_gemini_error_status_is_upstream() {
    let addr = spawn(Router::new().route("/models/*rest", post(generate_content))).await;
    let provider =
        GeminiChatProvider::new("wrong").with_base_url(format!("http://{addr}/models"));

    let err = provider
        .complete(&[ChatMessage::user("hi")], &CompletionOptions::default())
        .await
        .unwrap_err();

    assert!(matches!(&err, DomainError::Upstream(msg) if msg.contains("403")));
}
