//! Domain Entities
//!
//! - Agent: selectable voice/chat persona configuration
//! - LlmConfig: stored LLM provider configuration
//! - ConversationMessage: one side of a persisted chat exchange
//! - Credential: ephemeral realtime session token issued by the vendor

mod agent;
mod conversation;
mod credential;
mod llm_config;

pub use agent::*;
pub use conversation::*;
pub use credential::*;
pub use llm_config::*;
