//! In-memory repositories
//!
//! Process-local stores with the same semantics as the Postgres adapters,
//! used to drive the router in tests.

use async_trait::async_trait;
use tokio::sync::RwLock;

use voxrelay::{
    Agent, AgentRepository, ConversationMessage, ConversationRepository, DomainError, LlmConfig,
    LlmConfigRepository,
};

#[derive(Default)]
pub struct InMemoryAgentRepository {
    agents: RwLock<Vec<Agent>>,
}

impl InMemoryAgentRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AgentRepository for InMemoryAgentRepository {
    async fn find_by_id(&self, id: &str) -> Result<Option<Agent>, DomainError> {
        Ok(self.agents.read().await.iter().find(|a| a.id == id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Agent>, DomainError> {
        Ok(self
            .agents
            .read()
            .await
            .iter()
            .find(|a| a.name == name)
            .cloned())
    }

    async fn find_all(&self) -> Result<Vec<Agent>, DomainError> {
        let mut agents = self.agents.read().await.clone();
        agents.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(agents)
    }

    async fn insert(&self, agent: &Agent) -> Result<Agent, DomainError> {
        let mut agents = self.agents.write().await;
        if agents.iter().any(|a| a.id == agent.id) {
            return Err(DomainError::Conflict(format!(
                "Agent {} already exists",
                agent.id
            )));
        }
        agents.push(agent.clone());
        Ok(agent.clone())
    }

    async fn update(&self, agent: &Agent) -> Result<Option<Agent>, DomainError> {
        let mut agents = self.agents.write().await;
        Ok(agents.iter_mut().find(|a| a.id == agent.id).map(|slot| {
            *slot = agent.clone();
            slot.clone()
        }))
    }

    async fn delete(&self, id: &str) -> Result<bool, DomainError> {
        let mut agents = self.agents.write().await;
        let before = agents.len();
        agents.retain(|a| a.id != id);
        Ok(agents.len() != before)
    }
}

#[derive(Default)]
pub struct InMemoryConversationRepository {
    messages: RwLock<Vec<ConversationMessage>>,
}

impl InMemoryConversationRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ConversationRepository for InMemoryConversationRepository {
    async fn append(&self, messages: &[ConversationMessage]) -> Result<(), DomainError> {
        self.messages.write().await.extend_from_slice(messages);
        Ok(())
    }

    async fn find_by_session(
        &self,
        session_id: &str,
    ) -> Result<Vec<ConversationMessage>, DomainError> {
        // Insertion order already matches timestamp order.
        Ok(self
            .messages
            .read()
            .await
            .iter()
            .filter(|m| m.session_id == session_id)
            .cloned()
            .collect())
    }
}

#[derive(Default)]
pub struct InMemoryLlmConfigRepository {
    configs: RwLock<Vec<LlmConfig>>,
}

impl InMemoryLlmConfigRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl LlmConfigRepository for InMemoryLlmConfigRepository {
    async fn find_all(&self) -> Result<Vec<LlmConfig>, DomainError> {
        Ok(self.configs.read().await.clone())
    }

    async fn insert(&self, config: &LlmConfig) -> Result<LlmConfig, DomainError> {
        let mut configs = self.configs.write().await;
        if configs.iter().any(|c| c.id == config.id) {
            return Err(DomainError::Conflict(format!(
                "LLM config {} already exists",
                config.id
            )));
        }
        configs.push(config.clone());
        Ok(config.clone())
    }

    async fn delete(&self, id: &str) -> Result<bool, DomainError> {
        let mut configs = self.configs.write().await;
        let before = configs.len();
        configs.retain(|c| c.id != id);
        Ok(configs.len() != before)
    }
}
