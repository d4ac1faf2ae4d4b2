mod common;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use serde_json::json;

use common::{body_bytes, body_json, FakeGateway, TestAppBuilder};

const OFFER: &str = "v=0\r\no=- 4611731400430051336 2 IN IP4 127.0.0.1\r\ns=-\r\nt=0 0\r\nm=audio 9 UDP/TLS/RTP/SAVPF 111\r\n";
const ANSWER: &str = "v=0\r\no=- 1 1 IN IP4 0.0.0.0\r\ns=-\r\nt=0 0\r\na=group:BUNDLE 0\r\nm=audio 9 UDP/TLS/RTP/SAVPF 111\r\n";

fn offer_request(content_type: &str, body: &str) -> Request<Body> {
    Request::post("/api/v1/realtime/negotiate")
        .header(header::CONTENT_TYPE, content_type)
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn session_request() -> Request<Body> {
    Request::post("/api/v1/realtime/session")
        .body(Body::empty())
        .unwrap()
}

#[tokio::test]
async fn test_credential_returned_verbatim() {
    let gateway = FakeGateway::answering(ANSWER);
    let app = TestAppBuilder::new().gateway(gateway.clone()).build().await;

    let response = app.send(session_request()).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, gateway.credential);
    assert_eq!(*gateway.sessions.lock().unwrap(), 1);
}

#[tokio::test]
async fn test_credential_without_secret_is_502() {
    let gateway = FakeGateway::with_credential(json!({
        "id": "sess_002",
        "client_secret": {"expires_at": 1735689600}
    }));
    let app = TestAppBuilder::new().gateway(gateway).build().await;

    let response = app.send(session_request()).await;

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn test_answer_relayed_byte_for_byte() {
    let gateway = FakeGateway::answering(ANSWER);
    let app = TestAppBuilder::new().gateway(gateway.clone()).build().await;

    let response = app.send(offer_request("application/sdp", OFFER)).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "application/sdp"
    );
    assert_eq!(body_bytes(response).await, ANSWER.as_bytes());
    assert_eq!(*gateway.offers.lock().unwrap(), vec![OFFER.to_string()]);
}

#[tokio::test]
async fn test_non_sdp_body_is_415() {
    let gateway = FakeGateway::answering(ANSWER);
    let app = TestAppBuilder::new().gateway(gateway.clone()).build().await;

    let response = app
        .send(offer_request("application/json", r#"{"sdp":"v=0"}"#))
        .await;

    assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    assert!(gateway.offers.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_empty_offer_is_400() {
    let gateway = FakeGateway::answering(ANSWER);
    let app = TestAppBuilder::new().gateway(gateway.clone()).build().await;

    let response = app.send(offer_request("application/sdp", "")).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(gateway.offers.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_vendor_rejection_is_502() {
    let gateway = FakeGateway::rejecting("realtime negotiation failed (400 Bad Request)");
    let app = TestAppBuilder::new().gateway(gateway).build().await;

    let response = app.send(offer_request("application/sdp", OFFER)).await;

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn test_unconfigured_gateway_is_503() {
    let app = TestAppBuilder::new().build().await;

    assert_eq!(
        app.send(session_request()).await.status(),
        StatusCode::SERVICE_UNAVAILABLE
    );
    assert_eq!(
        app.send(offer_request("application/sdp", OFFER))
            .await
            .status(),
        StatusCode::SERVICE_UNAVAILABLE
    );
}
