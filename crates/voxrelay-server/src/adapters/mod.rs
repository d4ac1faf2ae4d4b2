//! Infrastructure Adapters
//!
//! Implementations of domain ports for external systems.

pub mod gemini_chat;
pub mod memory;
pub mod openai_realtime;
pub mod postgres;

// Re-exports
pub use gemini_chat::GeminiChatProvider;
pub use memory::{
    InMemoryAgentRepository, InMemoryConversationRepository, InMemoryLlmConfigRepository,
};
pub use openai_realtime::OpenAiRealtimeGateway;
pub use postgres::{PgAgentRepository, PgConversationRepository, PgLlmConfigRepository};
