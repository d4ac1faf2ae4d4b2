//! Application Layer (Use Cases)
//!
//! Orchestrates domain operations and coordinates between
//! repositories and vendor gateways.

mod agent_service;
mod chat_service;
mod llm_config_service;
mod session_relay;

pub use agent_service::AgentService;
pub use chat_service::{ChatReply, ChatService};
pub use llm_config_service::LlmConfigService;
pub use session_relay::SessionRelay;
