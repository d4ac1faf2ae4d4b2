//! voxrelay API Data Models
//!
//! - Agent: voice agent configuration
//! - Chat: text chat turn and stored conversation messages
//! - LlmConfig: stored LLM provider configuration

mod agent;
mod chat;
mod llm_config;

pub use agent::*;
pub use chat::*;
pub use llm_config::*;
