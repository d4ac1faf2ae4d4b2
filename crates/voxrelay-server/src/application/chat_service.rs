//! Chat Application Service
//!
//! Text chat with an agent: the agent's system prompt plus the stored session
//! history go to the chat provider, and both sides of the exchange are
//! persisted afterwards.

use std::sync::Arc;

use uuid::Uuid;
use voxrelay::{
    AgentRepository, ChatMessage, ChatProvider, CompletionOptions, ConversationMessage,
    ConversationRepository, DomainError,
};

/// Result of one chat turn
#[derive(Debug, Clone, PartialEq)]
pub struct ChatReply {
    pub response: String,
    pub session_id: String,
}

pub struct ChatService {
    agents: Arc<dyn AgentRepository>,
    conversations: Arc<dyn ConversationRepository>,
    provider: Option<Arc<dyn ChatProvider>>,
    options: CompletionOptions,
}

impl ChatService {
    pub fn new(
        agents: Arc<dyn AgentRepository>,
        conversations: Arc<dyn ConversationRepository>,
        provider: Option<Arc<dyn ChatProvider>>,
    ) -> Self {
        Self {
            agents,
            conversations,
            provider,
            options: CompletionOptions::default(),
        }
    }

    /// Send one user message. A missing or blank `session_id` starts a new session.
    pub async fn send(
        &self,
        agent_id: &str,
        message: &str,
        session_id: Option<String>,
    ) -> Result<ChatReply, DomainError> {
        let agent_id = agent_id.trim();
        if agent_id.is_empty() {
            return Err(DomainError::validation("No agent selected"));
        }
        if message.trim().is_empty() {
            return Err(DomainError::validation("Message must not be empty"));
        }
        let provider = self
            .provider
            .as_ref()
            .ok_or_else(|| DomainError::unavailable("chat provider is not configured"))?;

        let agent = self
            .agents
            .find_by_id(agent_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Agent", agent_id))?;

        let session_id = session_id
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| Uuid::new_v4().to_string());

        let history = self.conversations.find_by_session(&session_id).await?;

        let mut messages = Vec::with_capacity(history.len() + 2);
        messages.push(ChatMessage::system(agent.system_prompt.as_str()));
        messages.extend(history.iter().map(ChatMessage::from));
        messages.push(ChatMessage::user(message));

        let completion = provider.complete(&messages, &self.options).await?;
        if completion.content.trim().is_empty() {
            return Err(DomainError::upstream(format!(
                "{} returned an empty response",
                provider.provider_name()
            )));
        }

        tracing::debug!(
            "Chat completion for agent {} ({} tokens, model {})",
            agent.id,
            completion.usage.total_tokens,
            completion.model
        );

        self.conversations
            .append(&[
                ConversationMessage::user(&session_id, &agent.id, message),
                ConversationMessage::assistant(&session_id, &agent.id, &completion.content),
            ])
            .await?;

        Ok(ChatReply {
            response: completion.content,
            session_id,
        })
    }

    /// Stored messages of a session, oldest first
    pub async fn history(&self, session_id: &str) -> Result<Vec<ConversationMessage>, DomainError> {
        self.conversations.find_by_session(session_id).await
    }
}
