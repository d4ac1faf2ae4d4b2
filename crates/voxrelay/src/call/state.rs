//! Call lifecycle state machine
//!
//! ```text
//! disconnected ──begin──▶ connecting ──establish──▶ connected
//!      ▲                      │                        │
//!      │                     fail                      │
//!      │                      ▼                        │
//!      └──────end────────── error ◀──────── end ───────┘
//! ```
//!
//! `end` is accepted from every state. `begin` is accepted from
//! `disconnected` and `error` only.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::CallError;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum CallState {
    #[default]
    Disconnected,
    Connecting {
        agent_id: String,
    },
    Connected {
        agent_id: String,
        since: DateTime<Utc>,
    },
    Error {
        agent_id: String,
        reason: String,
    },
}

impl CallState {
    pub fn name(&self) -> &'static str {
        match self {
            CallState::Disconnected => "disconnected",
            CallState::Connecting { .. } => "connecting",
            CallState::Connected { .. } => "connected",
            CallState::Error { .. } => "error",
        }
    }

    /// Agent the current or last attempt was made for
    pub fn agent_id(&self) -> Option<&str> {
        match self {
            CallState::Disconnected => None,
            CallState::Connecting { agent_id }
            | CallState::Connected { agent_id, .. }
            | CallState::Error { agent_id, .. } => Some(agent_id),
        }
    }

    /// A call is being set up or is live
    pub fn is_active(&self) -> bool {
        matches!(
            self,
            CallState::Connecting { .. } | CallState::Connected { .. }
        )
    }

    pub fn begin(&self, agent_id: &str) -> Result<CallState, CallError> {
        match self {
            CallState::Disconnected | CallState::Error { .. } => Ok(CallState::Connecting {
                agent_id: agent_id.to_string(),
            }),
            other => Err(illegal("begin", other)),
        }
    }

    pub fn establish(&self) -> Result<CallState, CallError> {
        match self {
            CallState::Connecting { agent_id } => Ok(CallState::Connected {
                agent_id: agent_id.clone(),
                since: Utc::now(),
            }),
            other => Err(illegal("establish", other)),
        }
    }

    pub fn fail(&self, reason: impl Into<String>) -> Result<CallState, CallError> {
        match self {
            CallState::Connecting { agent_id } => Ok(CallState::Error {
                agent_id: agent_id.clone(),
                reason: reason.into(),
            }),
            other => Err(illegal("fail", other)),
        }
    }

    pub fn end(&self) -> CallState {
        CallState::Disconnected
    }
}

impl std::fmt::Display for CallState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CallState::Error { reason, .. } => write!(f, "error ({})", reason),
            other => f.write_str(other.name()),
        }
    }
}

fn illegal(transition: &str, from: &CallState) -> CallError {
    CallError::Validation(format!(
        "cannot {} a call while {}",
        transition,
        from.name()
    ))
}
