//! Chat User Model

use serde::{Deserialize, Serialize};

/// Storefront visitor registered through the chat widget (访客)
///
/// One row per `(shop, email)` pair. Re-registering from a new browser
/// re-binds the visitor to the new session id instead of creating a
/// duplicate row.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct ChatUser {
    pub id: i64,
    pub shop: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    /// Widget-generated session id the visitor is currently bound to
    pub session_id: String,
    pub last_active: i64,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Registration payload sent by the widget contact form
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatUserRegister {
    pub shop: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    pub email: String,
    pub session_id: String,
}
