//! Call Client
//!
//! Owns at most one peer connection and walks it through the negotiation
//! hand-off: credential, microphone, data channel, offer, relay, answer.
//! Every step is awaited in order; there are no timeouts and no retries.

use std::sync::Arc;

use super::ports::{
    AudioOutput, AudioSink, MediaDevices, PeerConnector, PeerSession, RealtimeRelay,
    EVENTS_CHANNEL,
};
use super::{CallError, CallState};

/// Peer connection plus the audio sink acquired alongside it
struct ActiveCall {
    peer: Box<dyn PeerSession>,
    sink: Arc<dyn AudioSink>,
}

impl ActiveCall {
    async fn shutdown(mut self) {
        self.peer.close().await;
        self.sink.release();
    }
}

/// Single-call voice client
pub struct CallClient<R, M, P, A>
where
    R: RealtimeRelay,
    M: MediaDevices,
    P: PeerConnector,
    A: AudioOutput,
{
    relay: R,
    media: M,
    peers: P,
    audio: A,
    state: CallState,
    active: Option<ActiveCall>,
}

impl<R, M, P, A> CallClient<R, M, P, A>
where
    R: RealtimeRelay,
    M: MediaDevices,
    P: PeerConnector,
    A: AudioOutput,
{
    pub fn new(relay: R, media: M, peers: P, audio: A) -> Self {
        Self {
            relay,
            media,
            peers,
            audio,
            state: CallState::Disconnected,
            active: None,
        }
    }

    pub fn state(&self) -> &CallState {
        &self.state
    }

    /// All attached local tracks are disabled
    pub fn is_muted(&self) -> bool {
        let tracks = self.local_tracks();
        !tracks.is_empty() && tracks.iter().all(|t| !t.is_enabled())
    }

    /// Place a call for `agent_id`.
    ///
    /// On failure the state is `error`, the peer connection created during
    /// the attempt is closed and the audio sink released.
    pub async fn start(&mut self, agent_id: &str) -> Result<(), CallError> {
        let agent_id = agent_id.trim();
        if agent_id.is_empty() {
            return Err(CallError::Validation("no agent selected".to_string()));
        }
        self.state = self.state.begin(agent_id)?;
        tracing::info!(agent_id, "Call connecting");

        let credential = match self.relay.request_credential().await {
            Ok(credential) => credential,
            Err(e) => return Err(self.fail(e)),
        };

        let mut call = match self.peers.connect(&credential).await {
            Ok(peer) => ActiveCall {
                peer,
                sink: self.audio.open(),
            },
            Err(e) => return Err(self.fail(e)),
        };

        if let Err(e) = self.negotiate(&mut call).await {
            call.shutdown().await;
            return Err(self.fail(e));
        }

        self.state = self.state.establish()?;
        self.active = Some(call);
        tracing::info!(agent_id, "Call connected");
        Ok(())
    }

    /// Hang up. Safe to call in any state.
    pub async fn end(&mut self) {
        if let Some(call) = self.active.take() {
            call.shutdown().await;
            tracing::info!("Call ended");
        }
        self.state = self.state.end();
    }

    /// Flip `enabled` on every local audio track. Returns whether the call is
    /// now muted, or `None` when no call is live.
    pub fn toggle_mute(&mut self) -> Option<bool> {
        let tracks = self.local_tracks();
        if tracks.is_empty() {
            return None;
        }
        for track in &tracks {
            track.toggle();
        }
        let muted = self.is_muted();
        tracing::info!(muted, "Microphone toggled");
        Some(muted)
    }

    async fn negotiate(&self, call: &mut ActiveCall) -> Result<(), CallError> {
        call.peer.route_remote_audio(call.sink.clone());

        let microphone = self.media.request_microphone().await?;
        call.peer.add_local_track(microphone).await?;
        call.peer.open_data_channel(EVENTS_CHANNEL).await?;

        let offer = call.peer.create_offer().await?;
        let answer = self.relay.negotiate(&offer).await?;
        call.peer.apply_answer(&answer).await
    }

    fn fail(&mut self, err: CallError) -> CallError {
        tracing::warn!(error = %err, "Call failed");
        if let Ok(next) = self.state.fail(err.to_string()) {
            self.state = next;
        }
        err
    }

    fn local_tracks(&self) -> Vec<Arc<super::LocalAudioTrack>> {
        self.active
            .as_ref()
            .map(|call| call.peer.local_tracks())
            .unwrap_or_default()
    }
}
