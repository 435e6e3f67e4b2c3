//! Server-side database models
//!
//! Rows that never cross the API boundary in full (password hashes stay
//! on the server). Wire-visible chat entities live in `shared::models`.

pub mod admin_account;

pub use admin_account::*;
