//! voxrelay Domain Library
//!
//! Core domain types and interfaces for the voxrelay voice-agent relay.
//!
//! # Architecture
//!
//! This crate follows Clean Architecture / Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain/`): Pure business entities and logic
//!   - `entities/`: Agent, LlmConfig, ConversationMessage, Credential
//!   - `value_objects/`: Provider, MessageRole
//!   - `errors/`: Domain-specific error types
//!
//! - **Ports** (`ports/`): Abstract interfaces (traits)
//!   - `repositories/`: Data access interfaces
//!   - `services/`: Vendor interfaces (chat LLM, realtime gateway)
//!
//! - **Call Client** (`call/`): the client half of a realtime voice call,
//!   generic over its relay, media and peer-connection ports
//!
//! # Usage
//!
//! ```rust,ignore
//! use voxrelay::domain::{Agent, Credential};
//! use voxrelay::ports::{AgentRepository, RealtimeGateway};
//! use voxrelay::call::CallClient;
//! ```

pub mod call;
pub mod domain;
pub mod ports;

// Re-export commonly used types
pub use call::{CallClient, CallError, CallState};
pub use domain::{
    Agent, AgentPatch, ConversationMessage, Credential, DomainError, LlmConfig, MessageRole,
    Provider, DEFAULT_AGENT_NAME, DEFAULT_LANGUAGE,
};
pub use ports::{
    // Repositories
    AgentRepository,
    // Vendor services
    ChatMessage,
    ChatProvider,
    CompletionOptions,
    CompletionResponse,
    ConversationRepository,
    LlmConfigRepository,
    RealtimeGateway,
    TokenUsage,
};
