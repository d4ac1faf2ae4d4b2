//! Chat and conversation DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use voxrelay::ConversationMessage;

#[derive(Debug, Deserialize, ToSchema)]
pub struct ChatRequest {
    pub agent_id: String,
    pub message: String,
    /// Continue an existing session; a new one is started when omitted
    pub session_id: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ChatResponse {
    pub response: String,
    pub session_id: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ConversationMessageResponse {
    pub id: String,
    pub session_id: String,
    pub agent_id: String,
    /// "user" or "assistant"
    pub role: String,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

impl From<ConversationMessage> for ConversationMessageResponse {
    fn from(message: ConversationMessage) -> Self {
        Self {
            id: message.id,
            session_id: message.session_id,
            agent_id: message.agent_id,
            role: message.role.to_string(),
            content: message.content,
            timestamp: message.timestamp,
        }
    }
}
