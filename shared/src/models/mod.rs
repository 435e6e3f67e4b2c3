//! Data models
//!
//! Shared between widget-server and the merchant inbox client (via API).
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! All IDs are `i64` (SQLite INTEGER PRIMARY KEY).
//!
//! Chat entities serialize with camelCase keys because the storefront
//! widget consumes them as-is.

pub mod chat_message;
pub mod chat_session;
pub mod chat_settings;
pub mod chat_user;

// Re-exports
pub use chat_message::*;
pub use chat_session::*;
pub use chat_settings::*;
pub use chat_user::*;
