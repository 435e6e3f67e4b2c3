//! 商家收件箱模块
//!
//! 所有路由挂在 `/api/admin` 下，由认证中间件注入 [`CurrentAdmin`]。
//! 每个查询都以令牌里的 shop 为租户边界。

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/admin", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/chat-sessions", get(handler::list_sessions))
        .route("/chat-messages", get(handler::list_messages))
        .route("/chat-reply", post(handler::reply))
        .route(
            "/chat-settings",
            get(handler::get_settings).post(handler::update_settings),
        )
}
