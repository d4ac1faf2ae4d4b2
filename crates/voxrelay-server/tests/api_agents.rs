mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::{body_json, pizza_agent, TestAppBuilder};

#[tokio::test]
async fn test_list_includes_hindi_agent() {
    let app = TestAppBuilder::new().agent(pizza_agent()).build().await;

    let response = app.get("/api/agents").await;
    assert_eq!(response.status(), StatusCode::OK);

    let agents = body_json(response).await;
    let a1 = agents
        .as_array()
        .unwrap()
        .iter()
        .find(|a| a["id"] == "a1")
        .expect("agent a1 listed");
    assert_eq!(a1["language"], "hindi");
}

#[tokio::test]
async fn test_agent_crud_lifecycle() {
    let app = TestAppBuilder::new().build().await;

    let response = app
        .post_json(
            "/api/agents",
            json!({
                "name": "Support Agent",
                "description": "Answers support questions",
                "system_prompt": "You are a helpful support agent."
            }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let created = body_json(response).await;
    let id = created["id"].as_str().unwrap().to_string();
    assert_eq!(created["language"], "hindi");
    assert_eq!(created["is_active"], true);

    let fetched = body_json(app.get(&format!("/api/agents/{id}")).await).await;
    assert_eq!(fetched["name"], "Support Agent");

    let response = app
        .put_json(
            &format!("/api/agents/{id}"),
            json!({"language": "english", "is_active": false}),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let updated = body_json(response).await;
    assert_eq!(updated["language"], "english");
    assert_eq!(updated["is_active"], false);
    assert_eq!(updated["name"], "Support Agent");
    assert_eq!(updated["system_prompt"], "You are a helpful support agent.");

    let response = app.delete(&format!("/api/agents/{id}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await["message"],
        "Agent deleted successfully"
    );

    let response = app.get(&format!("/api/agents/{id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_unknown_agent_is_404_for_every_verb() {
    let app = TestAppBuilder::new().build().await;

    assert_eq!(
        app.get("/api/agents/missing").await.status(),
        StatusCode::NOT_FOUND
    );
    assert_eq!(
        app.put_json("/api/agents/missing", json!({"name": "x"}))
            .await
            .status(),
        StatusCode::NOT_FOUND
    );
    assert_eq!(
        app.delete("/api/agents/missing").await.status(),
        StatusCode::NOT_FOUND
    );
}

#[tokio::test]
async fn test_blank_name_is_rejected() {
    let app = TestAppBuilder::new().build().await;

    let response = app
        .post_json(
            "/api/agents",
            json!({"name": " ", "system_prompt": "prompt"}),
        )
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_json(app.get("/api/agents").await)
        .await
        .as_array()
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn test_llm_config_key_is_masked() {
    let app = TestAppBuilder::new().build().await;

    let response = app
        .post_json(
            "/api/llm-configs",
            json!({
                "provider": "gemini",
                "api_key": "AIzaSyExampleKey1234",
                "model_name": "gemini-2.0-flash"
            }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let created = body_json(response).await;
    assert_eq!(created["provider"], "google");
    assert_eq!(created["api_key"], "****************1234");

    let listed = body_json(app.get("/api/llm-configs").await).await;
    assert_eq!(listed.as_array().unwrap().len(), 1);

    let id = created["id"].as_str().unwrap();
    assert_eq!(
        app.delete(&format!("/api/llm-configs/{id}")).await.status(),
        StatusCode::OK
    );
    assert_eq!(
        app.delete(&format!("/api/llm-configs/{id}")).await.status(),
        StatusCode::NOT_FOUND
    );
}

#[tokio::test]
async fn test_unknown_provider_is_400() {
    let app = TestAppBuilder::new().build().await;
    let response = app
        .post_json(
            "/api/llm-configs",
            json!({"provider": "mistral", "api_key": "k-123456", "model_name": "m"}),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
