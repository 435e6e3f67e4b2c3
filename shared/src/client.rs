//! Client-related types shared between server and client
//!
//! Common request/response types used in API communication.
//! Auth DTOs are spoken between widget-server and the merchant inbox
//! client; widget DTOs are spoken between widget-server and the
//! storefront widget (camelCase, `{ success, ... }` envelopes).

use crate::models::{ChatMessage, ChatUser};
use serde::{Deserialize, Serialize};

// =============================================================================
// Auth API DTOs
// =============================================================================

/// Login request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub shop: String,
    pub username: String,
    pub password: String,
}

/// Login response data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub admin: AdminInfo,
}

/// Admin account information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminInfo {
    pub id: i64,
    pub shop: String,
    pub username: String,
    pub display_name: String,
}

// =============================================================================
// Widget API DTOs
// =============================================================================

/// Message send request from the widget
///
/// Deliberately carries no sender field: the server stamps `user` on
/// everything arriving through the public endpoint, so a spoofed
/// `"sender": "admin"` key in the body is ignored by deserialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetMessageRequest {
    pub session_id: String,
    pub message: String,
}

/// Reply request from the merchant inbox
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplyRequest {
    pub session_id: String,
    pub message: String,
}

/// Widget envelope for a successful registration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterResponse {
    pub success: bool,
    pub user: ChatUser,
}

/// Widget envelope for a newly appended message
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageResponse {
    pub success: bool,
    pub new_message: ChatMessage,
}

/// Widget envelope for a transcript fetch
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessagesResponse {
    pub success: bool,
    pub messages: Vec<ChatMessage>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Sender;

    #[test]
    fn test_message_response_uses_new_message_key() {
        let resp = MessageResponse {
            success: true,
            new_message: ChatMessage {
                id: 1,
                session_id: "sess_1".into(),
                sender: Sender::User,
                message: "hi".into(),
                created_at: 1000,
            },
        };
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["success"], true);
        assert!(json.get("newMessage").is_some());
        assert!(json.get("new_message").is_none());
    }

    #[test]
    fn test_widget_message_request_ignores_sender_key() {
        // A spoofed sender field must not break deserialization
        let req: WidgetMessageRequest = serde_json::from_str(
            r#"{"sessionId":"sess_1","message":"hi","sender":"admin"}"#,
        )
        .unwrap();
        assert_eq!(req.session_id, "sess_1");
        assert_eq!(req.message, "hi");
    }
}
