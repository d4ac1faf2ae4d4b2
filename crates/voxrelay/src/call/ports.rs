//! Call Client ports
//!
//! The call client never talks to a network stack or an audio device
//! directly. Everything it drives is behind one of these traits so the CLI
//! can plug in a real WebRTC peer and tests can plug in fakes.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;

use super::CallError;
use crate::domain::Credential;

/// Label of the data channel carrying vendor event messages
pub const EVENTS_CHANNEL: &str = "oai-events";

/// Client side of the session relay
#[async_trait]
pub trait RealtimeRelay: Send + Sync {
    /// Ask the relay for a fresh vendor credential
    async fn request_credential(&self) -> Result<Credential, CallError>;

    /// Send the local SDP offer, get the vendor's SDP answer back
    async fn negotiate(&self, offer_sdp: &str) -> Result<String, CallError>;
}

/// Access to the local microphone
#[async_trait]
pub trait MediaDevices: Send + Sync {
    /// Request a microphone track. Denial is [`CallError::Permission`].
    async fn request_microphone(&self) -> Result<Arc<LocalAudioTrack>, CallError>;
}

/// Factory for peer connections
#[async_trait]
pub trait PeerConnector: Send + Sync {
    async fn connect(&self, credential: &Credential) -> Result<Box<dyn PeerSession>, CallError>;
}

/// One peer connection, exclusively owned by the call client
#[async_trait]
pub trait PeerSession: Send + Sync {
    async fn add_local_track(&mut self, track: Arc<LocalAudioTrack>) -> Result<(), CallError>;

    /// Local audio tracks currently attached
    fn local_tracks(&self) -> Vec<Arc<LocalAudioTrack>>;

    /// Open the data channel used for vendor events
    async fn open_data_channel(&mut self, label: &str) -> Result<(), CallError>;

    /// Deliver remote audio to `sink` once a remote track arrives
    fn route_remote_audio(&mut self, sink: Arc<dyn AudioSink>);

    async fn create_offer(&mut self) -> Result<String, CallError>;

    async fn apply_answer(&mut self, answer_sdp: &str) -> Result<(), CallError>;

    /// Close the data channel and the connection. Safe to call twice.
    async fn close(&mut self);
}

/// Source of remote-audio sinks; one sink per call
pub trait AudioOutput: Send + Sync {
    fn open(&self) -> Arc<dyn AudioSink>;
}

/// Plays the remote stream of a single call
pub trait AudioSink: Send + Sync {
    /// Handle one encoded remote audio payload
    fn play(&self, payload: &[u8]);

    /// Detach from the call; later payloads are dropped
    fn release(&self);

    fn is_released(&self) -> bool;
}

/// A local audio track. `enabled` is a local property only, it is never
/// negotiated with the remote side.
#[derive(Debug)]
pub struct LocalAudioTrack {
    id: String,
    label: String,
    enabled: AtomicBool,
}

impl LocalAudioTrack {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            enabled: AtomicBool::new(true),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::SeqCst)
    }

    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::SeqCst);
    }

    /// Flip `enabled`, returning the new value
    pub fn toggle(&self) -> bool {
        !self.enabled.fetch_xor(true, Ordering::SeqCst)
    }
}
