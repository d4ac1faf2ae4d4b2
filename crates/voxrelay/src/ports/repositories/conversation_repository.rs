//! Conversation Repository Port

use async_trait::async_trait;

use crate::domain::{errors::DomainError, ConversationMessage};

/// Repository interface for chat history
#[async_trait]
pub trait ConversationRepository: Send + Sync {
    /// Append messages in order
    async fn append(&self, messages: &[ConversationMessage]) -> Result<(), DomainError>;

    /// Messages of one session, oldest first
    async fn find_by_session(
        &self,
        session_id: &str,
    ) -> Result<Vec<ConversationMessage>, DomainError>;
}
