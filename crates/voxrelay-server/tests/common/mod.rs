//! Shared harness: the real router over in-memory repositories and fake vendors.

#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{Request, Response},
    Router,
};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use tower::ServiceExt; // for oneshot
use tower_http::cors::CorsLayer;

use voxrelay::{
    Agent, AgentRepository, ChatMessage, ChatProvider, CompletionOptions, CompletionResponse,
    Credential, DomainError, RealtimeGateway, TokenUsage,
};
use voxrelay_server::{
    adapters::{InMemoryAgentRepository, InMemoryConversationRepository, InMemoryLlmConfigRepository},
    app,
    application::{AgentService, ChatService, LlmConfigService, SessionRelay},
    AppState,
};

pub const PIZZA_REPLY: &str = "Ji bilkul! 2 pizzas MG Road ke liye note kar liya hai.";

/// Realtime gateway double that records every offer it sees
pub struct FakeGateway {
    pub credential: Value,
    pub answer: Result<String, String>,
    pub offers: Mutex<Vec<String>>,
    pub sessions: Mutex<usize>,
}

impl FakeGateway {
    pub fn answering(answer: &str) -> Arc<Self> {
        Arc::new(Self {
            credential: json!({
                "id": "sess_001",
                "object": "realtime.session",
                "model": "gpt-4o-realtime-preview-2024-12-17",
                "client_secret": {"value": "ek_test_secret", "expires_at": 1735689600}
            }),
            answer: Ok(answer.to_string()),
            offers: Mutex::new(Vec::new()),
            sessions: Mutex::new(0),
        })
    }

    pub fn with_credential(credential: Value) -> Arc<Self> {
        Arc::new(Self {
            credential,
            answer: Ok("v=0\r\n".to_string()),
            offers: Mutex::new(Vec::new()),
            sessions: Mutex::new(0),
        })
    }

    pub fn rejecting(message: &str) -> Arc<Self> {
        Arc::new(Self {
            credential: json!({"client_secret": {"value": "ek_test_secret"}}),
            answer: Err(message.to_string()),
            offers: Mutex::new(Vec::new()),
            sessions: Mutex::new(0),
        })
    }
}

#[async_trait]
impl RealtimeGateway for FakeGateway {
    async fn create_session(&self) -> Result<Credential, DomainError> {
        *self.sessions.lock().unwrap() += 1;
        Credential::from_payload(self.credential.clone())
    }

    async fn negotiate(&self, offer_sdp: &str) -> Result<String, DomainError> {
        self.offers.lock().unwrap().push(offer_sdp.to_string());
        self.answer.clone().map_err(DomainError::Upstream)
    }
}

/// Chat provider double with a fixed reply
pub struct FakeChat {
    pub reply: String,
    pub calls: Mutex<Vec<Vec<ChatMessage>>>,
}

impl FakeChat {
    pub fn replying(reply: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: reply.to_string(),
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl ChatProvider for FakeChat {
    async fn complete(
        &self,
        messages: &[ChatMessage],
        _options: &CompletionOptions,
    ) -> Result<CompletionResponse, DomainError> {
        self.calls.lock().unwrap().push(messages.to_vec());
        Ok(CompletionResponse {
            content: self.reply.clone(),
            model: "fake".to_string(),
            usage: TokenUsage::default(),
            finish_reason: Some("STOP".to_string()),
        })
    }

    fn provider_name(&self) -> &str {
        "fake"
    }

    fn model_id(&self) -> &str {
        "fake"
    }
}

pub struct TestApp {
    pub router: Router,
    pub agents: Arc<InMemoryAgentRepository>,
}

pub struct TestAppBuilder {
    gateway: Option<Arc<dyn RealtimeGateway>>,
    chat: Option<Arc<dyn ChatProvider>>,
    api_key: Option<String>,
    agents: Vec<Agent>,
}

impl TestAppBuilder {
    pub fn new() -> Self {
        Self {
            gateway: None,
            chat: None,
            api_key: None,
            agents: Vec::new(),
        }
    }

    pub fn gateway(mut self, gateway: Arc<FakeGateway>) -> Self {
        self.gateway = Some(gateway);
        self
    }

    pub fn chat(mut self, chat: Arc<FakeChat>) -> Self {
        self.chat = Some(chat);
        self
    }

    pub fn api_key(mut self, key: &str) -> Self {
        self.api_key = Some(key.to_string());
        self
    }

    pub fn agent(mut self, agent: Agent) -> Self {
        self.agents.push(agent);
        self
    }

    pub async fn build(self) -> TestApp {
        let agents = Arc::new(InMemoryAgentRepository::new());
        for agent in &self.agents {
            agents.insert(agent).await.unwrap();
        }
        let conversations = Arc::new(InMemoryConversationRepository::new());

        let state = AppState {
            agent_service: Arc::new(AgentService::new(agents.clone())),
            llm_config_service: Arc::new(LlmConfigService::new(Arc::new(
                InMemoryLlmConfigRepository::new(),
            ))),
            chat_service: Arc::new(ChatService::new(agents.clone(), conversations, self.chat)),
            session_relay: Arc::new(SessionRelay::new(self.gateway)),
            api_key: self.api_key.as_deref().map(Arc::from),
        };

        TestApp {
            router: app(state, CorsLayer::permissive()),
            agents,
        }
    }
}

/// The Hindi pizza agent used across scenarios, with a fixed id
pub fn pizza_agent() -> Agent {
    let mut agent = Agent::new(
        "Pizza Order Agent".to_string(),
        "Takes pizza orders".to_string(),
        "Aap ek pizza order lene wale agent hain.".to_string(),
        None,
    );
    agent.id = "a1".to_string();
    agent
}

impl TestApp {
    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.router.clone().oneshot(request).await.unwrap()
    }

    pub async fn get(&self, uri: &str) -> Response<Body> {
        self.send(Request::get(uri).body(Body::empty()).unwrap())
            .await
    }

    pub async fn delete(&self, uri: &str) -> Response<Body> {
        self.send(Request::delete(uri).body(Body::empty()).unwrap())
            .await
    }

    pub async fn post_json(&self, uri: &str, body: Value) -> Response<Body> {
        self.send(json_request("POST", uri, body)).await
    }

    pub async fn put_json(&self, uri: &str, body: Value) -> Response<Body> {
        self.send(json_request("PUT", uri, body)).await
    }
}

pub fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}

pub async fn body_json(response: Response<Body>) -> Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}
