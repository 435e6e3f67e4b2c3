//! Chat Session Model

use super::chat_message::Sender;
use serde::{Deserialize, Serialize};

/// A chat conversation keyed by the widget-generated session id
///
/// `shop` and `email` stay NULL until the visitor registers; a session
/// created implicitly by a first message has no identity yet and is not
/// listed in the merchant inbox.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct ChatSession {
    pub session_id: String,
    pub shop: Option<String>,
    pub email: Option<String>,
    pub created_at: i64,
}

/// Inbox list row: session plus its latest message for preview
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct ChatSessionPreview {
    pub session_id: String,
    pub shop: Option<String>,
    pub email: Option<String>,
    pub created_at: i64,
    pub last_message: Option<String>,
    pub last_sender: Option<Sender>,
    pub last_message_at: Option<i64>,
}
