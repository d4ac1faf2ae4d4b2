//! Agent request/response DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use voxrelay::{Agent, AgentPatch};

/// Create Agent request
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateAgentRequest {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub system_prompt: String,
    /// Defaults to "hindi"
    pub language: Option<String>,
}

/// Update Agent request. Omitted fields are left unchanged.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateAgentRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub system_prompt: Option<String>,
    pub language: Option<String>,
    pub is_active: Option<bool>,
}

impl From<UpdateAgentRequest> for AgentPatch {
    fn from(req: UpdateAgentRequest) -> Self {
        Self {
            name: req.name,
            description: req.description,
            system_prompt: req.system_prompt,
            language: req.language,
            is_active: req.is_active,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AgentResponse {
    pub id: String,
    pub name: String,
    pub description: String,
    pub system_prompt: String,
    pub language: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Agent> for AgentResponse {
    fn from(agent: Agent) -> Self {
        Self {
            id: agent.id,
            name: agent.name,
            description: agent.description,
            system_prompt: agent.system_prompt,
            language: agent.language,
            is_active: agent.is_active,
            created_at: agent.created_at,
            updated_at: agent.updated_at,
        }
    }
}

/// Plain acknowledgement body
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
