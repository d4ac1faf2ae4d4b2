//! Realtime Gateway Port
//!
//! The vendor's realtime voice endpoint, treated as a black box: it issues
//! ephemeral credentials and turns an SDP offer into an SDP answer.

use async_trait::async_trait;

use crate::domain::{errors::DomainError, Credential};

/// Vendor realtime gateway
///
/// Implementations make exactly one vendor request per call: no retries,
/// no timeout policy. Any vendor-side failure is reported as
/// [`DomainError::Upstream`].
#[async_trait]
pub trait RealtimeGateway: Send + Sync {
    /// Request a short-lived session credential
    async fn create_session(&self) -> Result<Credential, DomainError>;

    /// Forward a raw SDP offer and return the raw SDP answer
    async fn negotiate(&self, offer_sdp: &str) -> Result<String, DomainError>;
}
