//! Session Relay
//!
//! Forwards credential requests and SDP offers to the realtime gateway and
//! hands the vendor's responses back unmodified. Stateless per request: no
//! retries, no timeout policy, no idempotency key.

use std::sync::Arc;

use voxrelay::{Credential, DomainError, RealtimeGateway};

pub struct SessionRelay {
    gateway: Option<Arc<dyn RealtimeGateway>>,
}

impl SessionRelay {
    pub fn new(gateway: Option<Arc<dyn RealtimeGateway>>) -> Self {
        Self { gateway }
    }

    fn gateway(&self) -> Result<&Arc<dyn RealtimeGateway>, DomainError> {
        self.gateway
            .as_ref()
            .ok_or_else(|| DomainError::unavailable("realtime gateway is not configured"))
    }

    /// Issue an ephemeral credential. The secret itself is never logged.
    pub async fn request_credential(&self) -> Result<Credential, DomainError> {
        let credential = self.gateway()?.create_session().await?;

        match credential.expires_at() {
            Some(expires_at) => {
                tracing::info!("🎟️  Realtime credential issued (expires {})", expires_at)
            }
            None => tracing::info!("🎟️  Realtime credential issued"),
        }

        Ok(credential)
    }

    /// Relay an SDP offer and return the vendor's answer verbatim
    pub async fn negotiate(&self, offer_sdp: &str) -> Result<String, DomainError> {
        if offer_sdp.trim().is_empty() {
            return Err(DomainError::validation("SDP offer must not be empty"));
        }

        let answer = self.gateway()?.negotiate(offer_sdp).await?;
        tracing::info!("🔗 SDP negotiated ({} byte answer)", answer.len());

        Ok(answer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct CountingGateway {
        negotiations: AtomicUsize,
    }

    #[async_trait]
    impl RealtimeGateway for CountingGateway {
        async fn create_session(&self) -> Result<Credential, DomainError> {
            Credential::from_payload(json!({"client_secret": {"value": "ek_1"}}))
        }

        async fn negotiate(&self, offer_sdp: &str) -> Result<String, DomainError> {
            self.negotiations.fetch_add(1, Ordering::SeqCst);
            Ok(format!("answer-for:{offer_sdp}"))
        }
    }

    #[tokio::test]
    async fn test_empty_offer_never_reaches_gateway() {
        let gateway = Arc::new(CountingGateway::default());
        let relay = SessionRelay::new(Some(gateway.clone()));

        let err = relay.negotiate("\r\n").await.unwrap_err();

        assert!(matches!(err, DomainError::Validation(_)));
        assert_eq!(gateway.negotiations.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_answer_returned_verbatim() {
        let relay = SessionRelay::new(Some(Arc::new(CountingGateway::default())));
        let answer = relay.negotiate("v=0\r\n").await.unwrap();
        assert_eq!(answer, "answer-for:v=0\r\n");
    }

    #[tokio::test]
    async fn test_unconfigured_gateway_is_unavailable() {
        let relay = SessionRelay::new(None);
        let err = relay.request_credential().await.unwrap_err();
        assert!(matches!(err, DomainError::Unavailable(_)));
    }
}
