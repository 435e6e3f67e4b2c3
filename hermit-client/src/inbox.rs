//! Optimistic reply tracking for the merchant inbox
//!
//! A reply the operator submits shows up immediately as pending, then is
//! promoted to delivered once the server acknowledges the write, or marked
//! failed with the error text. The transcript itself stays
//! server-authoritative: a delivered reply drops out of the pending list as
//! soon as a polled snapshot contains it. Nothing is shown as sent that the
//! server has not confirmed.

use shared::models::ChatMessage;
use uuid::Uuid;

use crate::error::{ClientError, ClientResult};
use crate::http::HttpClient;

/// Delivery state of one optimistic reply
#[derive(Debug, Clone)]
pub enum ReplyState {
    /// Submitted, no server acknowledgement yet
    Pending,
    /// Server persisted the message
    Delivered(ChatMessage),
    /// Server rejected the reply; the operator sees the error text
    Failed(String),
}

impl ReplyState {
    pub fn is_pending(&self) -> bool {
        matches!(self, ReplyState::Pending)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, ReplyState::Failed(_))
    }
}

/// One locally tracked reply
#[derive(Debug, Clone)]
pub struct PendingReply {
    pub local_id: Uuid,
    pub message: String,
    pub state: ReplyState,
}

/// Local view of one session: the polled transcript plus in-flight replies
#[derive(Debug, Default)]
pub struct InboxTranscript {
    pub session_id: String,
    pub messages: Vec<ChatMessage>,
    pub pending: Vec<PendingReply>,
}

impl InboxTranscript {
    pub fn new(session_id: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            messages: Vec::new(),
            pending: Vec::new(),
        }
    }

    /// Stage a reply before the network call; returns its local id
    pub fn stage_reply(&mut self, message: impl Into<String>) -> Uuid {
        let local_id = Uuid::new_v4();
        self.pending.push(PendingReply {
            local_id,
            message: message.into(),
            state: ReplyState::Pending,
        });
        local_id
    }

    /// Promote a pending reply once the server acknowledged the write
    ///
    /// Only a pending reply can be promoted; a reply already settled as
    /// failed stays failed.
    pub fn confirm_reply(&mut self, local_id: Uuid, message: ChatMessage) {
        if let Some(reply) = self.find_pending(local_id) {
            reply.state = ReplyState::Delivered(message);
        }
    }

    /// Settle a pending reply as failed
    pub fn fail_reply(&mut self, local_id: Uuid, error: impl Into<String>) {
        if let Some(reply) = self.find_pending(local_id) {
            reply.state = ReplyState::Failed(error.into());
        }
    }

    /// Replace the transcript with a polled snapshot
    ///
    /// Delivered replies contained in the snapshot are dropped from the
    /// pending list; failed replies stay until the operator dismisses or
    /// retries them.
    pub fn apply_snapshot(&mut self, messages: Vec<ChatMessage>) {
        self.pending.retain(|reply| match &reply.state {
            ReplyState::Delivered(delivered) => {
                !messages.iter().any(|snap| snap.id == delivered.id)
            }
            _ => true,
        });
        self.messages = messages;
    }

    /// Replies the operator still needs to watch
    pub fn unresolved(&self) -> impl Iterator<Item = &PendingReply> {
        self.pending
            .iter()
            .filter(|reply| reply.state.is_pending() || reply.state.is_failed())
    }

    fn find_pending(&mut self, local_id: Uuid) -> Option<&mut PendingReply> {
        self.pending
            .iter_mut()
            .find(|reply| reply.local_id == local_id && reply.state.is_pending())
    }
}

/// Send one staged reply and settle its state from the outcome
pub async fn deliver_reply(
    client: &HttpClient,
    transcript: &mut InboxTranscript,
    local_id: Uuid,
) -> ClientResult<ChatMessage> {
    let message = transcript
        .pending
        .iter()
        .find(|reply| reply.local_id == local_id)
        .map(|reply| reply.message.clone())
        .ok_or_else(|| ClientError::Validation(format!("Unknown reply {local_id}")))?;

    match client.send_reply(&transcript.session_id, &message).await {
        Ok(delivered) => {
            transcript.confirm_reply(local_id, delivered.clone());
            Ok(delivered)
        }
        Err(e) => {
            transcript.fail_reply(local_id, e.to_string());
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::Sender;

    fn server_message(id: i64, message: &str) -> ChatMessage {
        ChatMessage {
            id,
            session_id: "sess_1".into(),
            sender: Sender::Admin,
            message: message.into(),
            created_at: 1000 + id,
        }
    }

    #[test]
    fn test_staged_reply_starts_pending() {
        let mut transcript = InboxTranscript::new("sess_1");
        let local_id = transcript.stage_reply("on it!");

        assert_eq!(transcript.pending.len(), 1);
        assert_eq!(transcript.pending[0].local_id, local_id);
        assert!(transcript.pending[0].state.is_pending());
        assert_eq!(transcript.unresolved().count(), 1);
    }

    #[test]
    fn test_confirm_promotes_to_delivered() {
        let mut transcript = InboxTranscript::new("sess_1");
        let local_id = transcript.stage_reply("on it!");

        transcript.confirm_reply(local_id, server_message(7, "on it!"));

        match &transcript.pending[0].state {
            ReplyState::Delivered(msg) => assert_eq!(msg.id, 7),
            other => panic!("expected delivered, got {other:?}"),
        }
        // Delivered replies no longer need operator attention
        assert_eq!(transcript.unresolved().count(), 0);
    }

    #[test]
    fn test_fail_keeps_reply_visible() {
        let mut transcript = InboxTranscript::new("sess_1");
        let local_id = transcript.stage_reply("on it!");

        transcript.fail_reply(local_id, "Server error: 500");

        assert!(transcript.pending[0].state.is_failed());
        assert_eq!(transcript.unresolved().count(), 1);
    }

    #[test]
    fn test_failed_reply_cannot_be_promoted() {
        let mut transcript = InboxTranscript::new("sess_1");
        let local_id = transcript.stage_reply("on it!");

        transcript.fail_reply(local_id, "timeout");
        transcript.confirm_reply(local_id, server_message(7, "on it!"));

        assert!(transcript.pending[0].state.is_failed());
    }

    #[test]
    fn test_snapshot_absorbs_delivered_replies() {
        let mut transcript = InboxTranscript::new("sess_1");
        let local_id = transcript.stage_reply("on it!");
        transcript.confirm_reply(local_id, server_message(7, "on it!"));

        let failed_id = transcript.stage_reply("second");
        transcript.fail_reply(failed_id, "rejected");

        transcript.apply_snapshot(vec![
            server_message(6, "earlier visitor message"),
            server_message(7, "on it!"),
        ]);

        assert_eq!(transcript.messages.len(), 2);
        // The delivered reply is now part of the transcript; the failed one
        // stays staged so the operator can see it
        assert_eq!(transcript.pending.len(), 1);
        assert_eq!(transcript.pending[0].local_id, failed_id);
    }

    #[test]
    fn test_snapshot_keeps_delivered_replies_not_yet_polled() {
        let mut transcript = InboxTranscript::new("sess_1");
        let local_id = transcript.stage_reply("on it!");
        transcript.confirm_reply(local_id, server_message(7, "on it!"));

        // Snapshot raced the write and does not contain the reply yet
        transcript.apply_snapshot(vec![server_message(6, "visitor")]);

        assert_eq!(transcript.pending.len(), 1);
    }
}
