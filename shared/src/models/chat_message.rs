//! Chat Message Model

use serde::{Deserialize, Serialize};
use std::fmt;

/// Who authored a chat message
///
/// Stored as lowercase TEXT in SQLite. The server stamps this itself on
/// every append; it is never taken from the public request body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "lowercase"))]
pub enum Sender {
    /// Storefront visitor
    User,
    /// Merchant replying from the inbox
    Admin,
}

impl Sender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sender::User => "user",
            Sender::Admin => "admin",
        }
    }
}

impl fmt::Display for Sender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One message in a chat session transcript
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct ChatMessage {
    pub id: i64,
    pub session_id: String,
    pub sender: Sender,
    pub message: String,
    pub created_at: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sender_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Sender::User).unwrap(), "\"user\"");
        assert_eq!(serde_json::to_string(&Sender::Admin).unwrap(), "\"admin\"");
    }

    #[test]
    fn test_message_wire_format_is_camel_case() {
        let msg = ChatMessage {
            id: 42,
            session_id: "sess_1".into(),
            sender: Sender::User,
            message: "hello".into(),
            created_at: 1000,
        };
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["sessionId"], "sess_1");
        assert_eq!(json["sender"], "user");
        assert_eq!(json["createdAt"], 1000);
    }
}
