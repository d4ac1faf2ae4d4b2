//! PostgreSQL Repository Implementations

mod agent_repository;
mod conversation_repository;
mod llm_config_repository;

pub use agent_repository::PgAgentRepository;
pub use conversation_repository::PgConversationRepository;
pub use llm_config_repository::PgLlmConfigRepository;
