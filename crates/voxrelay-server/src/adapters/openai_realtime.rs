//! OpenAI Realtime gateway.
//!
//! Two calls, both bearer-authenticated with the server's key:
//! - `POST {base}/realtime/sessions` issues an ephemeral credential
//! - `POST {base}/realtime?model=...` exchanges an SDP offer for an answer

use async_trait::async_trait;
use reqwest::{header, Client, Response};
use serde::Serialize;
use serde_json::Value;

use voxrelay::{Credential, DomainError, RealtimeGateway};

use crate::config::RealtimeSettings;

const SDP_CONTENT_TYPE: &str = "application/sdp";

#[derive(Clone)]
pub struct OpenAiRealtimeGateway {
    client: Client,
    api_key: String,
    settings: RealtimeSettings,
}

#[derive(Serialize)]
struct SessionRequest<'a> {
    model: &'a str,
    voice: &'a str,
}

impl OpenAiRealtimeGateway {
    pub fn new(api_key: impl Into<String>, settings: RealtimeSettings) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            settings,
        }
    }

    pub fn model(&self) -> &str {
        &self.settings.model
    }
}

/// Turn a non-2xx vendor response into an upstream error carrying status and body
async fn ensure_success(response: Response, operation: &str) -> Result<Response, DomainError> {
    if response.status().is_success() {
        return Ok(response);
    }

    let status = response.status();
    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "Failed to read error body".to_string());
    tracing::warn!("Realtime {} failed ({}): {}", operation, status, body);
    Err(DomainError::upstream(format!(
        "realtime {} failed ({}): {}",
        operation, status, body
    )))
}

#[async_trait]
impl RealtimeGateway for OpenAiRealtimeGateway {
    async fn create_session(&self) -> Result<Credential, DomainError> {
        let url = format!("{}/realtime/sessions", self.settings.base_url);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&SessionRequest {
                model: &self.settings.model,
                voice: &self.settings.voice,
            })
            .send()
            .await
            .map_err(|e| DomainError::upstream(format!("realtime session request failed: {e}")))?;

        let payload: Value = ensure_success(response, "session request")
            .await?
            .json()
            .await
            .map_err(|e| DomainError::upstream(format!("realtime session payload: {e}")))?;

        Credential::from_payload(payload)
    }

    async fn negotiate(&self, offer_sdp: &str) -> Result<String, DomainError> {
        let url = format!("{}/realtime", self.settings.base_url);

        let response = self
            .client
            .post(&url)
            .query(&[("model", self.settings.model.as_str())])
            .bearer_auth(&self.api_key)
            .header(header::CONTENT_TYPE, SDP_CONTENT_TYPE)
            .body(offer_sdp.to_string())
            .send()
            .await
            .map_err(|e| DomainError::upstream(format!("realtime negotiation failed: {e}")))?;

        ensure_success(response, "negotiation")
            .await?
            .text()
            .await
            .map_err(|e| DomainError::upstream(format!("realtime answer body: {e}")))
    }
}
