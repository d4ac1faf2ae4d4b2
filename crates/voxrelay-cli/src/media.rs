//! Terminal media devices.
//!
//! There is no capture or playback: the microphone is a permission prompt
//! yielding a track handle, and remote audio is counted rather than played.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use dialoguer::Confirm;
use uuid::Uuid;

use voxrelay::call::{AudioOutput, AudioSink, CallError, LocalAudioTrack, MediaDevices};

/// Asks the operator before handing out the microphone
pub struct PromptMicrophone {
    assume_yes: bool,
}

impl PromptMicrophone {
    pub fn new(assume_yes: bool) -> Self {
        Self { assume_yes }
    }
}

#[async_trait]
impl MediaDevices for PromptMicrophone {
    async fn request_microphone(&self) -> Result<Arc<LocalAudioTrack>, CallError> {
        let granted = if self.assume_yes {
            true
        } else {
            tokio::task::spawn_blocking(|| {
                Confirm::new()
                    .with_prompt("Allow voxrelay to use the microphone?")
                    .default(true)
                    .interact()
            })
            .await
            .map_err(|e| CallError::Permission(e.to_string()))?
            .map_err(|e| CallError::Permission(e.to_string()))?
        };

        if !granted {
            return Err(CallError::Permission("denied by user".to_string()));
        }

        Ok(Arc::new(LocalAudioTrack::new(
            format!("mic-{}", Uuid::new_v4()),
            "Default microphone",
        )))
    }
}

/// Counts remote RTP payloads of one call
#[derive(Debug, Default)]
pub struct PacketCounterSink {
    packets: AtomicU64,
    bytes: AtomicU64,
    released: AtomicBool,
}

impl PacketCounterSink {
    pub fn packets(&self) -> u64 {
        self.packets.load(Ordering::Relaxed)
    }

    pub fn bytes(&self) -> u64 {
        self.bytes.load(Ordering::Relaxed)
    }
}

impl AudioSink for PacketCounterSink {
    fn play(&self, payload: &[u8]) {
        if self.is_released() {
            return;
        }
        self.packets.fetch_add(1, Ordering::Relaxed);
        self.bytes.fetch_add(payload.len() as u64, Ordering::Relaxed);
    }

    fn release(&self) {
        self.released.store(true, Ordering::SeqCst);
    }

    fn is_released(&self) -> bool {
        self.released.load(Ordering::SeqCst)
    }
}

/// Hands out one [`PacketCounterSink`] per call and keeps the latest for stats
#[derive(Clone, Default)]
pub struct TerminalAudio {
    current: Arc<Mutex<Option<Arc<PacketCounterSink>>>>,
}

impl TerminalAudio {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sink of the most recent call, if any
    pub fn current(&self) -> Option<Arc<PacketCounterSink>> {
        self.current.lock().ok().and_then(|slot| slot.clone())
    }
}

impl AudioOutput for TerminalAudio {
    fn open(&self) -> Arc<dyn AudioSink> {
        let sink = Arc::new(PacketCounterSink::default());
        if let Ok(mut slot) = self.current.lock() {
            *slot = Some(sink.clone());
        }
        sink
    }
}
