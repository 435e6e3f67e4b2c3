//! TranscriptPoller — background task that re-fetches one session's transcript
//!
//! Polling is the only delivery channel: the server holds no subscriptions,
//! so the inbox re-fetches the transcript on a fixed timer and hands a fresh
//! snapshot to the UI only when the message count changed. Cancellation is
//! explicit via [`CancellationToken`], tied to session switch or UI close.

use std::time::Duration;

use shared::models::ChatMessage;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::http::HttpClient;

/// Poll interval between transcript fetches
pub const POLL_INTERVAL_SECS: u64 = 4;

/// Tracks the transcript length behind the last emitted snapshot
///
/// Transcripts are append-only, so a changed count is the signal that the
/// snapshot the receiver holds is stale.
#[derive(Debug, Default)]
pub struct SnapshotTracker {
    seen: usize,
}

impl SnapshotTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a fetched transcript length; returns true when it differs
    /// from the last emitted snapshot
    pub fn observe(&mut self, count: usize) -> bool {
        if count == self.seen {
            return false;
        }
        self.seen = count;
        true
    }
}

/// Background poller for one chat session
pub struct TranscriptPoller {
    client: HttpClient,
    session_id: String,
    interval: Duration,
    shutdown: CancellationToken,
}

impl TranscriptPoller {
    pub fn new(
        client: HttpClient,
        session_id: impl Into<String>,
        shutdown: CancellationToken,
    ) -> Self {
        Self {
            client,
            session_id: session_id.into(),
            interval: Duration::from_secs(POLL_INTERVAL_SECS),
            shutdown,
        }
    }

    /// Override the poll interval
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Run the polling loop
    ///
    /// The first fetch happens immediately, then every `interval`. A failed
    /// fetch is logged and skipped; the next tick catches up. The loop ends
    /// on cancellation or when the receiver is dropped.
    pub async fn run(self, tx: mpsc::Sender<Vec<ChatMessage>>) {
        tracing::info!(session_id = %self.session_id, "Transcript poller started");

        let mut interval = tokio::time::interval(self.interval);
        let mut tracker = SnapshotTracker::new();

        loop {
            tokio::select! {
                _ = self.shutdown.cancelled() => {
                    tracing::info!(session_id = %self.session_id, "Transcript poller shutting down");
                    break;
                }

                _ = interval.tick() => {
                    match self.client.chat_messages(&self.session_id).await {
                        Ok(messages) => {
                            if tracker.observe(messages.len()) {
                                if tx.send(messages).await.is_err() {
                                    tracing::debug!(
                                        session_id = %self.session_id,
                                        "Snapshot receiver dropped, transcript poller stopping"
                                    );
                                    break;
                                }
                            }
                        }
                        Err(e) => {
                            tracing::warn!(session_id = %self.session_id, "Transcript poll failed: {e}");
                        }
                    }
                }
            }
        }
    }

    /// Spawn the polling loop onto the runtime
    pub fn spawn(self, tx: mpsc::Sender<Vec<ChatMessage>>) -> JoinHandle<()> {
        tokio::spawn(self.run(tx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ClientConfig;

    #[test]
    fn test_tracker_emits_only_on_count_change() {
        let mut tracker = SnapshotTracker::new();
        assert!(tracker.observe(3));
        assert!(!tracker.observe(3));
        assert!(tracker.observe(5));
        assert!(!tracker.observe(5));
    }

    #[test]
    fn test_tracker_stays_quiet_on_empty_transcript() {
        let mut tracker = SnapshotTracker::new();
        assert!(!tracker.observe(0));
        assert!(tracker.observe(1));
    }

    #[tokio::test]
    async fn test_poller_skips_errors_and_stops_on_cancel() {
        // Bind an ephemeral port and drop the listener so every poll is
        // refused: failed fetches must emit nothing, and cancellation must
        // end the task cleanly.
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };

        let client = HttpClient::new(&ClientConfig::new(format!("http://127.0.0.1:{port}")));
        let shutdown = CancellationToken::new();
        let poller = TranscriptPoller::new(client, "sess_test", shutdown.clone())
            .with_interval(Duration::from_millis(10));

        let (tx, mut rx) = mpsc::channel(4);
        let handle = poller.spawn(tx);

        tokio::time::sleep(Duration::from_millis(50)).await;
        shutdown.cancel();
        handle.await.unwrap();

        assert!(rx.try_recv().is_err());
    }
}
