//! Call Client
//!
//! Client-side half of a realtime voice call: one peer connection, one local
//! microphone track, one vendor events data channel and one remote audio sink,
//! driven through the [`CallState`] lifecycle.

mod client;
mod error;
mod ports;
mod state;

pub use client::CallClient;
pub use error::CallError;
pub use ports::*;
pub use state::CallState;
