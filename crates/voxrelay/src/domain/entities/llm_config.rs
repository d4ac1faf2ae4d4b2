//! LlmConfig - Stored LLM provider configuration

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::value_objects::Provider;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LlmConfig {
    pub id: String,
    pub provider: Provider,
    pub api_key: String,
    pub model_name: String,
    pub created_at: DateTime<Utc>,
}

impl LlmConfig {
    pub fn new(provider: Provider, api_key: String, model_name: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            provider,
            api_key,
            model_name,
            created_at: Utc::now(),
        }
    }

    /// API key with everything but the last four characters hidden
    pub fn masked_api_key(&self) -> String {
        let chars: Vec<char> = self.api_key.chars().collect();
        if chars.len() <= 4 {
            return "*".repeat(chars.len());
        }
        let visible: String = chars[chars.len() - 4..].iter().collect();
        format!("{}{}", "*".repeat(chars.len() - 4), visible)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_masked_api_key() {
        let config = LlmConfig::new(Provider::OpenAI, "sk-abcdef1234".into(), "gpt-4o".into());
        assert_eq!(config.masked_api_key(), "*********1234");

        let short = LlmConfig::new(Provider::Google, "abc".into(), "gemini".into());
        assert_eq!(short.masked_api_key(), "***");
    }
}
