//! Repository Ports
//!
//! Abstract interfaces for data persistence operations.

mod agent_repository;
mod conversation_repository;
mod llm_config_repository;

pub use agent_repository::*;
pub use conversation_repository::*;
pub use llm_config_repository::*;
