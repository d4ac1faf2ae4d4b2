//! Call Errors

use thiserror::Error;

use crate::domain::DomainError;

/// Failures surfaced by the call client. None of them are retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CallError {
    /// Rejected before any network call (e.g. no agent selected)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Microphone access denied
    #[error("Microphone permission denied: {0}")]
    Permission(String),

    /// Relay or vendor gateway unreachable, or returned a malformed response
    #[error("Upstream error: {0}")]
    Upstream(String),

    /// The local WebRTC stack refused an operation
    #[error("Peer connection error: {0}")]
    PeerConnection(String),
}

impl From<DomainError> for CallError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(msg) => CallError::Validation(msg),
            other => CallError::Upstream(other.to_string()),
        }
    }
}
