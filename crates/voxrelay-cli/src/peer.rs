//! WebRTC peer connection for terminal calls.
//!
//! One `RTCPeerConnection` per call with a single Opus send track and the
//! vendor events data channel. ICE is not trickled: the offer is returned
//! only after candidate gathering has finished, so it can be relayed in a
//! single request.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::mpsc;
use webrtc::api::interceptor_registry::register_default_interceptors;
use webrtc::api::media_engine::{MediaEngine, MIME_TYPE_OPUS};
use webrtc::api::{APIBuilder, API};
use webrtc::data_channel::data_channel_message::DataChannelMessage;
use webrtc::data_channel::RTCDataChannel;
use webrtc::ice_transport::ice_server::RTCIceServer;
use webrtc::interceptor::registry::Registry;
use webrtc::peer_connection::configuration::RTCConfiguration;
use webrtc::peer_connection::peer_connection_state::RTCPeerConnectionState;
use webrtc::peer_connection::sdp::session_description::RTCSessionDescription;
use webrtc::peer_connection::RTCPeerConnection;
use webrtc::rtp_transceiver::rtp_codec::{
    RTCRtpCodecCapability, RTCRtpCodecParameters, RTPCodecType,
};
use webrtc::track::track_local::track_local_static_sample::TrackLocalStaticSample;
use webrtc::track::track_local::TrackLocal;
use webrtc::track::track_remote::TrackRemote;

use voxrelay::call::{AudioSink, CallError, LocalAudioTrack, PeerConnector, PeerSession};
use voxrelay::Credential;

const OPUS_PAYLOAD_TYPE: u8 = 111;
const STREAM_ID: &str = "voxrelay";

/// Connection-level events surfaced to the terminal loop
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PeerEvent {
    StateChanged(String),
    /// The remote side went away after the call was established
    Lost(String),
}

fn opus_capability() -> RTCRtpCodecCapability {
    RTCRtpCodecCapability {
        mime_type: MIME_TYPE_OPUS.to_string(),
        clock_rate: 48000,
        channels: 2,
        sdp_fmtp_line: "minptime=10;useinbandfec=1".to_string(),
        rtcp_feedback: vec![],
    }
}

fn peer_error(context: &str) -> impl Fn(webrtc::Error) -> CallError + '_ {
    move |e| CallError::PeerConnection(format!("{}: {}", context, e))
}

/// Builds one peer connection per call
pub struct WebRtcPeerConnector {
    ice_servers: Vec<String>,
    events: mpsc::UnboundedSender<PeerEvent>,
}

impl WebRtcPeerConnector {
    /// The receiver yields connection events of every peer this connector creates.
    pub fn new(ice_servers: Vec<String>) -> (Self, mpsc::UnboundedReceiver<PeerEvent>) {
        let (events, rx) = mpsc::unbounded_channel();
        (
            Self {
                ice_servers,
                events,
            },
            rx,
        )
    }

    fn build_api(&self) -> Result<API, CallError> {
        let mut media_engine = MediaEngine::default();
        media_engine
            .register_codec(
                RTCRtpCodecParameters {
                    capability: opus_capability(),
                    payload_type: OPUS_PAYLOAD_TYPE,
                    stats_id: String::new(),
                },
                RTPCodecType::Audio,
            )
            .map_err(peer_error("register Opus codec"))?;

        let registry = register_default_interceptors(Registry::new(), &mut media_engine)
            .map_err(peer_error("register interceptors"))?;

        Ok(APIBuilder::new()
            .with_media_engine(media_engine)
            .with_interceptor_registry(registry)
            .build())
    }

    fn rtc_config(&self) -> RTCConfiguration {
        let ice_servers = if self.ice_servers.is_empty() {
            vec![]
        } else {
            vec![RTCIceServer {
                urls: self.ice_servers.clone(),
                ..Default::default()
            }]
        };

        RTCConfiguration {
            ice_servers,
            ..Default::default()
        }
    }
}

#[async_trait]
impl PeerConnector for WebRtcPeerConnector {
    async fn connect(&self, credential: &Credential) -> Result<Box<dyn PeerSession>, CallError> {
        tracing::debug!(
            model = credential.model().unwrap_or("unknown"),
            expires_at = ?credential.expires_at(),
            "Creating peer connection"
        );

        let api = self.build_api()?;
        let pc = Arc::new(
            api.new_peer_connection(self.rtc_config())
                .await
                .map_err(peer_error("create peer connection"))?,
        );

        let events = self.events.clone();
        pc.on_peer_connection_state_change(Box::new(move |s: RTCPeerConnectionState| {
            tracing::info!("Peer connection state: {}", s);
            let event = match s {
                RTCPeerConnectionState::Failed | RTCPeerConnectionState::Disconnected => {
                    PeerEvent::Lost(s.to_string())
                }
                _ => PeerEvent::StateChanged(s.to_string()),
            };
            let _ = events.send(event);
            Box::pin(async {})
        }));

        Ok(Box::new(WebRtcPeer {
            pc,
            local_tracks: Vec::new(),
            data_channel: None,
            closed: false,
        }))
    }
}

/// A live peer connection
pub struct WebRtcPeer {
    pc: Arc<RTCPeerConnection>,
    local_tracks: Vec<Arc<LocalAudioTrack>>,
    data_channel: Option<Arc<RTCDataChannel>>,
    closed: bool,
}

#[async_trait]
impl PeerSession for WebRtcPeer {
    async fn add_local_track(&mut self, track: Arc<LocalAudioTrack>) -> Result<(), CallError> {
        let rtc_track = Arc::new(TrackLocalStaticSample::new(
            opus_capability(),
            track.id().to_string(),
            STREAM_ID.to_string(),
        ));

        self.pc
            .add_track(rtc_track as Arc<dyn TrackLocal + Send + Sync>)
            .await
            .map_err(peer_error("add audio track"))?;

        tracing::debug!(track = track.label(), "Local audio track attached");
        self.local_tracks.push(track);
        Ok(())
    }

    fn local_tracks(&self) -> Vec<Arc<LocalAudioTrack>> {
        self.local_tracks.clone()
    }

    async fn open_data_channel(&mut self, label: &str) -> Result<(), CallError> {
        let dc = self
            .pc
            .create_data_channel(label, None)
            .await
            .map_err(peer_error("create data channel"))?;

        let channel = label.to_string();
        dc.on_open(Box::new(move || {
            tracing::debug!(channel = %channel, "Data channel open");
            Box::pin(async {})
        }));

        // Vendor events are logged only.
        dc.on_message(Box::new(move |msg: DataChannelMessage| {
            let event_type = serde_json::from_slice::<serde_json::Value>(&msg.data)
                .ok()
                .and_then(|v| v.get("type").and_then(|t| t.as_str()).map(str::to_string));
            tracing::debug!(
                event = event_type.as_deref().unwrap_or("<non-json>"),
                bytes = msg.data.len(),
                "Vendor event"
            );
            Box::pin(async {})
        }));

        self.data_channel = Some(dc);
        Ok(())
    }

    fn route_remote_audio(&mut self, sink: Arc<dyn AudioSink>) {
        self.pc
            .on_track(Box::new(move |track: Arc<TrackRemote>, _, _| {
                tracing::info!("Remote {} track received", track.kind());
                let sink = sink.clone();
                Box::pin(async move {
                    while let Ok((packet, _)) = track.read_rtp().await {
                        if sink.is_released() {
                            break;
                        }
                        sink.play(&packet.payload);
                    }
                })
            }));
    }

    async fn create_offer(&mut self) -> Result<String, CallError> {
        let offer = self
            .pc
            .create_offer(None)
            .await
            .map_err(peer_error("create offer"))?;

        let mut gathering_complete = self.pc.gathering_complete_promise().await;
        self.pc
            .set_local_description(offer)
            .await
            .map_err(peer_error("set local description"))?;
        let _ = gathering_complete.recv().await;

        self.pc
            .local_description()
            .await
            .map(|desc| desc.sdp)
            .ok_or_else(|| CallError::PeerConnection("no local description".to_string()))
    }

    async fn apply_answer(&mut self, answer_sdp: &str) -> Result<(), CallError> {
        let answer = RTCSessionDescription::answer(answer_sdp.to_string())
            .map_err(|e| CallError::Upstream(format!("invalid SDP answer: {}", e)))?;

        self.pc
            .set_remote_description(answer)
            .await
            .map_err(|e| CallError::Upstream(format!("SDP answer rejected: {}", e)))
    }

    async fn close(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;

        if let Some(dc) = self.data_channel.take() {
            if let Err(e) = dc.close().await {
                tracing::debug!("Data channel close: {}", e);
            }
        }
        if let Err(e) = self.pc.close().await {
            tracing::warn!("Peer connection close: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn credential() -> Credential {
        Credential::from_payload(json!({"client_secret": {"value": "ek_test"}})).unwrap()
    }

    #[tokio::test]
    async fn test_offer_carries_audio_and_data_channel() {
        let (connector, _events) = WebRtcPeerConnector::new(vec![]);
        let mut peer = connector.connect(&credential()).await.unwrap();

        peer.add_local_track(Arc::new(LocalAudioTrack::new("mic-0", "microphone")))
            .await
            .unwrap();
        peer.open_data_channel("oai-events").await.unwrap();
        let offer = peer.create_offer().await.unwrap();

        assert!(offer.contains("m=audio"));
        assert!(offer.contains("m=application"));
        assert!(offer.to_lowercase().contains("opus/48000"));
        assert_eq!(peer.local_tracks().len(), 1);

        peer.close().await;
        peer.close().await;
    }

    #[tokio::test]
    async fn test_garbage_answer_is_upstream_error() {
        let (connector, _events) = WebRtcPeerConnector::new(vec![]);
        let mut peer = connector.connect(&credential()).await.unwrap();
        peer.open_data_channel("oai-events").await.unwrap();
        peer.create_offer().await.unwrap();

        let err = peer.apply_answer("not an sdp").await.unwrap_err();
        assert!(matches!(err, CallError::Upstream(_)));
        peer.close().await;
    }
}
