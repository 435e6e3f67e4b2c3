//! Shared types for the Hermit chat service
//!
//! Common types used across widget-server and the merchant inbox client:
//! error types, chat data models, and API request/response structures.

pub mod client;
pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use axum::{Json, body};
pub use http;
pub use serde::{Deserialize, Serialize};

// Error re-exports (for convenient access)
pub use error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
