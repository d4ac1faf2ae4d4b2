//! Agent Repository Port
//!
//! Abstract interface for Agent persistence operations.

use async_trait::async_trait;

use crate::domain::{errors::DomainError, Agent};

/// Repository interface for Agent documents
#[async_trait]
pub trait AgentRepository: Send + Sync {
    /// Find an Agent by ID
    async fn find_by_id(&self, id: &str) -> Result<Option<Agent>, DomainError>;

    /// Find the first Agent with the given display name
    async fn find_by_name(&self, name: &str) -> Result<Option<Agent>, DomainError>;

    /// Find all Agents, oldest first
    async fn find_all(&self) -> Result<Vec<Agent>, DomainError>;

    /// Insert a new Agent. Fails with `Conflict` when the ID is taken.
    async fn insert(&self, agent: &Agent) -> Result<Agent, DomainError>;

    /// Replace an existing Agent. Returns `None` when it does not exist.
    async fn update(&self, agent: &Agent) -> Result<Option<Agent>, DomainError>;

    /// Delete an Agent by ID
    async fn delete(&self, id: &str) -> Result<bool, DomainError>;
}
