//! 健康检查模块

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

/// 健康检查路由 - 公共路由 (无需认证)
pub fn router() -> Router<ServerState> {
    Router::new().route("/health", get(handler::health))
}
