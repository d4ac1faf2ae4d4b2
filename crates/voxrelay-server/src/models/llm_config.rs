//! LLM configuration DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use voxrelay::LlmConfig;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateLlmConfigRequest {
    /// openai, anthropic or google (gemini)
    pub provider: String,
    pub api_key: String,
    pub model_name: String,
}

/// Stored configuration; `api_key` is masked
#[derive(Debug, Serialize, ToSchema)]
pub struct LlmConfigResponse {
    pub id: String,
    pub provider: String,
    pub api_key: String,
    pub model_name: String,
    pub created_at: DateTime<Utc>,
}

impl From<LlmConfig> for LlmConfigResponse {
    fn from(config: LlmConfig) -> Self {
        Self {
            api_key: config.masked_api_key(),
            id: config.id,
            provider: config.provider.to_string(),
            model_name: config.model_name,
            created_at: config.created_at,
        }
    }
}
