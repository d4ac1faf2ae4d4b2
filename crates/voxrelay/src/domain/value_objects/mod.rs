//! Value Objects
//!
//! Immutable objects defined by their attributes rather than identity.

mod message_role;
mod provider;

pub use message_role::*;
pub use provider::*;
