//! Agent Application Service (Use Case)
//!
//! Orchestrates domain operations for agent management.

use std::sync::Arc;

use voxrelay::{Agent, AgentPatch, AgentRepository, DomainError, DEFAULT_AGENT_NAME};

/// Application service for Agent operations
pub struct AgentService {
    repo: Arc<dyn AgentRepository>,
}

impl AgentService {
    pub fn new(repo: Arc<dyn AgentRepository>) -> Self {
        Self { repo }
    }

    pub async fn list_all(&self) -> Result<Vec<Agent>, DomainError> {
        self.repo.find_all().await
    }

    pub async fn get_by_id(&self, id: &str) -> Result<Option<Agent>, DomainError> {
        self.repo.find_by_id(id).await
    }

    /// Create a new Agent. Language falls back to the default when omitted.
    pub async fn create(
        &self,
        name: String,
        description: String,
        system_prompt: String,
        language: Option<String>,
    ) -> Result<Agent, DomainError> {
        if name.trim().is_empty() {
            return Err(DomainError::validation("Agent name must not be empty"));
        }
        let language = language.filter(|l| !l.trim().is_empty());

        let agent = Agent::new(name, description, system_prompt, language);
        let saved = self.repo.insert(&agent).await?;

        tracing::info!("Created Agent: {} ({})", saved.name, saved.id);

        Ok(saved)
    }

    /// Partial update; only provided fields change
    pub async fn update(&self, id: &str, patch: AgentPatch) -> Result<Agent, DomainError> {
        if matches!(&patch.name, Some(name) if name.trim().is_empty()) {
            return Err(DomainError::validation("Agent name must not be empty"));
        }

        let mut agent = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Agent", id))?;

        if !agent.apply(patch) {
            return Ok(agent);
        }

        self.repo
            .update(&agent)
            .await?
            .ok_or_else(|| DomainError::not_found("Agent", id))
    }

    pub async fn delete(&self, id: &str) -> Result<bool, DomainError> {
        let deleted = self.repo.delete(id).await?;
        if deleted {
            tracing::info!("Deleted Agent: {}", id);
        }
        Ok(deleted)
    }

    /// Seed the order-taking agent unless one with that name already exists.
    /// Returns the agent when it was created.
    pub async fn ensure_default_agent(&self) -> Result<Option<Agent>, DomainError> {
        if self.repo.find_by_name(DEFAULT_AGENT_NAME).await?.is_some() {
            return Ok(None);
        }

        let agent = self.repo.insert(&Agent::order_taking_default()).await?;
        tracing::info!("🌱 Seeded default agent: {} ({})", agent.name, agent.id);
        Ok(Some(agent))
    }
}
