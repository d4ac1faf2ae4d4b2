//! LlmConfig Repository Port

use async_trait::async_trait;

use crate::domain::{errors::DomainError, LlmConfig};

#[async_trait]
pub trait LlmConfigRepository: Send + Sync {
    async fn find_all(&self) -> Result<Vec<LlmConfig>, DomainError>;

    async fn insert(&self, config: &LlmConfig) -> Result<LlmConfig, DomainError>;

    async fn delete(&self, id: &str) -> Result<bool, DomainError>;
}
