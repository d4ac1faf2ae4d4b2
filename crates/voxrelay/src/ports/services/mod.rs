//! Service Ports
//!
//! Abstract interfaces for external vendor services.

mod chat_provider;
mod realtime_gateway;

pub use chat_provider::*;
pub use realtime_gateway::*;
