//! 店面挂件公共模块
//!
//! 挂件脚本从任意店面源发起请求，全部无需令牌。
//! 会话凭证就是 session id 本身，跨域由全局 CORS 层放行。

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/public", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/chat-settings", get(handler::get_settings))
        .route("/chat-register", post(handler::register))
        .route("/chat-message", post(handler::send_message))
        .route("/chat-messages", get(handler::list_messages))
}
