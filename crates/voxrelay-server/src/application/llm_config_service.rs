//! LLM Config Application Service

use std::sync::Arc;

use voxrelay::{DomainError, LlmConfig, LlmConfigRepository, Provider};

pub struct LlmConfigService {
    repo: Arc<dyn LlmConfigRepository>,
}

impl LlmConfigService {
    pub fn new(repo: Arc<dyn LlmConfigRepository>) -> Self {
        Self { repo }
    }

    pub async fn list_all(&self) -> Result<Vec<LlmConfig>, DomainError> {
        self.repo.find_all().await
    }

    pub async fn create(
        &self,
        provider: &str,
        api_key: String,
        model_name: String,
    ) -> Result<LlmConfig, DomainError> {
        let provider: Provider = provider.parse().map_err(DomainError::validation)?;
        if api_key.trim().is_empty() {
            return Err(DomainError::validation("api_key must not be empty"));
        }
        if model_name.trim().is_empty() {
            return Err(DomainError::validation("model_name must not be empty"));
        }

        let config = self
            .repo
            .insert(&LlmConfig::new(provider, api_key, model_name))
            .await?;

        tracing::info!(
            "Stored LLM config {} ({} / {})",
            config.id,
            config.provider,
            config.model_name
        );

        Ok(config)
    }

    pub async fn delete(&self, id: &str) -> Result<bool, DomainError> {
        self.repo.delete(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::InMemoryLlmConfigRepository;

    #[tokio::test]
    async fn test_unknown_provider_rejected() {
        let service = LlmConfigService::new(Arc::new(InMemoryLlmConfigRepository::new()));
        let err = service
            .create("mistral", "key-1234".into(), "m".into())
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[tokio::test]
    async fn test_gemini_alias_stored_as_google() {
        let service = LlmConfigService::new(Arc::new(InMemoryLlmConfigRepository::new()));
        let config = service
            .create("gemini", "key-1234".into(), "gemini-2.0-flash".into())
            .await
            .unwrap();
        assert_eq!(config.provider, Provider::Google);
        assert_eq!(service.list_all().await.unwrap().len(), 1);
    }
}
