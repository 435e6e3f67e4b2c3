//! Hermit Client - HTTP client for the Hermit widget server
//!
//! Network layer for the merchant inbox: authenticated API calls, transcript
//! polling, optimistic reply tracking and geolocation display.

pub mod config;
pub mod error;
pub mod geo;
pub mod http;
pub mod inbox;
pub mod poller;

pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use geo::GeoInfo;
pub use http::HttpClient;
pub use inbox::{InboxTranscript, PendingReply, ReplyState, deliver_reply};
pub use poller::{POLL_INTERVAL_SECS, SnapshotTracker, TranscriptPoller};

// Re-export shared types for convenience
pub use shared::client::{AdminInfo, LoginResponse, ReplyRequest};
pub use shared::models::{
    ChatMessage, ChatSessionPreview, ChatSettingsUpdate, ChatSettingsView, Sender,
};
