//! ConversationMessage - Persisted chat exchange
//!
//! Pure domain entity without infrastructure dependencies.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::value_objects::MessageRole;

/// One message of a chat session, stored after each exchange
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationMessage {
    pub id: String,
    pub session_id: String,
    pub agent_id: String,
    pub role: MessageRole,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

impl ConversationMessage {
    pub fn new(
        session_id: impl Into<String>,
        agent_id: impl Into<String>,
        role: MessageRole,
        content: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            session_id: session_id.into(),
            agent_id: agent_id.into(),
            role,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }

    pub fn user(
        session_id: impl Into<String>,
        agent_id: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self::new(session_id, agent_id, MessageRole::User, content)
    }

    pub fn assistant(
        session_id: impl Into<String>,
        agent_id: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self::new(session_id, agent_id, MessageRole::Assistant, content)
    }
}
