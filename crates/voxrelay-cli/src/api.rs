//! voxrelay API Client

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use reqwest::{header, Client, RequestBuilder, Response};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use voxrelay::call::{CallError, RealtimeRelay};
use voxrelay::Credential;

/// API Client for the voxrelay server
#[derive(Clone)]
pub struct VoxrelayClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

// ============================================
// API Types
// ============================================

#[derive(Debug, Deserialize)]
pub struct AgentResponse {
    pub id: String,
    pub name: String,
    pub description: String,
    pub system_prompt: String,
    pub language: String,
    pub is_active: bool,
}

#[derive(Debug, Serialize)]
pub struct CreateAgentRequest {
    pub name: String,
    pub description: String,
    pub system_prompt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

#[derive(Debug, Default, Serialize)]
pub struct UpdateAgentRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_prompt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    agent_id: &'a str,
    message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    session_id: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    pub response: String,
    pub session_id: String,
}

#[derive(Debug, Deserialize)]
pub struct ConversationMessage {
    pub role: String,
    pub content: String,
}

impl VoxrelayClient {
    /// Create a new API client
    pub fn new(base_url: &str, api_key: Option<&str>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.map(str::to_string),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.api_key {
            Some(key) => request.bearer_auth(key),
            None => request,
        }
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response> {
        let resp = self
            .authorized(request)
            .send()
            .await
            .context("Failed to connect to voxrelay API")?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            bail!("API error ({}): {}", status, body);
        }

        Ok(resp)
    }

    /// Test connection with health check
    pub async fn health(&self) -> Result<bool> {
        let resp = self.client.get(self.url("/health")).send().await?;
        Ok(resp.status().is_success())
    }

    /// Check that the key is accepted on an authenticated route
    pub async fn verify_key(&self) -> Result<()> {
        self.send(self.client.get(self.url("/api/agents"))).await?;
        Ok(())
    }

    pub async fn list_agents(&self) -> Result<Vec<AgentResponse>> {
        let resp = self.send(self.client.get(self.url("/api/agents"))).await?;
        resp.json().await.context("Failed to parse response")
    }

    pub async fn get_agent(&self, id: &str) -> Result<AgentResponse> {
        let resp = self
            .send(self.client.get(self.url(&format!("/api/agents/{}", id))))
            .await?;
        resp.json().await.context("Failed to parse response")
    }

    pub async fn create_agent(&self, request: &CreateAgentRequest) -> Result<AgentResponse> {
        let resp = self
            .send(self.client.post(self.url("/api/agents")).json(request))
            .await?;
        resp.json().await.context("Failed to parse response")
    }

    pub async fn update_agent(
        &self,
        id: &str,
        request: &UpdateAgentRequest,
    ) -> Result<AgentResponse> {
        let resp = self
            .send(
                self.client
                    .put(self.url(&format!("/api/agents/{}", id)))
                    .json(request),
            )
            .await?;
        resp.json().await.context("Failed to parse response")
    }

    pub async fn delete_agent(&self, id: &str) -> Result<()> {
        self.send(self.client.delete(self.url(&format!("/api/agents/{}", id))))
            .await?;
        Ok(())
    }

    /// One chat turn. Rejects an empty message before any network call.
    pub async fn chat(
        &self,
        agent_id: &str,
        message: &str,
        session_id: Option<&str>,
    ) -> Result<ChatResponse> {
        if agent_id.trim().is_empty() {
            bail!("No agent selected");
        }
        if message.trim().is_empty() {
            bail!("Message must not be empty");
        }

        let request = ChatRequest {
            agent_id,
            message,
            session_id,
        };
        let resp = self
            .send(self.client.post(self.url("/api/chat")).json(&request))
            .await?;
        resp.json().await.context("Failed to parse response")
    }

    pub async fn conversation(&self, session_id: &str) -> Result<Vec<ConversationMessage>> {
        let resp = self
            .send(
                self.client
                    .get(self.url(&format!("/api/conversations/{}", session_id))),
            )
            .await?;
        resp.json().await.context("Failed to parse response")
    }
}

fn relay_error(err: anyhow::Error) -> CallError {
    CallError::Upstream(format!("{:#}", err))
}

#[async_trait]
impl RealtimeRelay for VoxrelayClient {
    async fn request_credential(&self) -> Result<Credential, CallError> {
        let resp = self
            .send(self.client.post(self.url("/api/v1/realtime/session")))
            .await
            .map_err(relay_error)?;

        let payload: Value = resp
            .json()
            .await
            .map_err(|e| CallError::Upstream(format!("Failed to parse credential: {}", e)))?;

        Ok(Credential::from_payload(payload)?)
    }

    async fn negotiate(&self, offer_sdp: &str) -> Result<String, CallError> {
        let resp = self
            .send(
                self.client
                    .post(self.url("/api/v1/realtime/negotiate"))
                    .header(header::CONTENT_TYPE, "application/sdp")
                    .body(offer_sdp.to_string()),
            )
            .await
            .map_err(relay_error)?;

        resp.text()
            .await
            .map_err(|e| CallError::Upstream(format!("Failed to read SDP answer: {}", e)))
    }
}
