//! Widget API Handlers
//!
//! 店面挂件的公共处理器。没有任何端点要求认证；
//! 写操作一律把发送方强制为 `user`，回复只能走收件箱接口。

use axum::{
    Json,
    extract::{Query, State},
    response::IntoResponse,
};
use serde::Deserialize;

use shared::client::{MessageResponse, MessagesResponse, RegisterResponse, WidgetMessageRequest};
use shared::models::{ChatSettingsView, ChatUserRegister, Sender};

use crate::core::ServerState;
use crate::db::repository::{chat_message, chat_session, chat_settings, chat_user};
use crate::utils::{AppError, AppResult, ErrorCode};

/// 挂件外观的缓存时长；店面每次加载页面都会拉取
const SETTINGS_CACHE_CONTROL: &str = "public, max-age=300";

#[derive(Debug, Deserialize)]
pub struct ShopQuery {
    pub shop: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionQuery {
    pub session_id: Option<String>,
}

/// GET /api/public/chat-settings?shop= - 挂件外观配置
///
/// 店铺尚未保存过配置时返回默认外观，响应可被 CDN 缓存
pub async fn get_settings(
    State(state): State<ServerState>,
    Query(query): Query<ShopQuery>,
) -> AppResult<impl IntoResponse> {
    let shop = query
        .shop
        .filter(|s| !s.trim().is_empty())
        .ok_or_else(|| AppError::new(ErrorCode::ShopRequired))?;

    let view = match chat_settings::find_by_shop(&state.pool, &shop).await? {
        Some(settings) => ChatSettingsView::from(settings),
        None => ChatSettingsView::defaults_for(&shop),
    };

    Ok((
        [(http::header::CACHE_CONTROL, SETTINGS_CACHE_CONTROL)],
        Json(view),
    ))
}

/// POST /api/public/chat-register - 访客注册
///
/// `(shop, email)` 已存在时更新绑定的 session id 而不是新建访客，
/// 同一个买家换设备或清掉 localStorage 后还能接上旧档案。
pub async fn register(
    State(state): State<ServerState>,
    Json(payload): Json<ChatUserRegister>,
) -> AppResult<Json<RegisterResponse>> {
    if payload.shop.trim().is_empty() {
        return Err(AppError::required_field("shop"));
    }
    if payload.email.trim().is_empty() {
        return Err(AppError::required_field("email"));
    }
    if payload.session_id.trim().is_empty() {
        return Err(AppError::required_field("sessionId"));
    }

    let user = chat_user::upsert(&state.pool, payload).await?;

    // 会话行一并打上店铺和邮箱标记，收件箱靠它过滤
    chat_session::bind_identity(&state.pool, &user.session_id, &user.shop, &user.email).await?;

    tracing::debug!(
        shop = %user.shop,
        session_id = %user.session_id,
        "Visitor registered"
    );

    Ok(Json(RegisterResponse {
        success: true,
        user,
    }))
}

/// POST /api/public/chat-message - 访客发消息
///
/// 请求体里出现的 sender 字段会在反序列化时被丢弃，
/// 这里写入的消息永远是 `user` 方向
pub async fn send_message(
    State(state): State<ServerState>,
    Json(req): Json<WidgetMessageRequest>,
) -> AppResult<Json<MessageResponse>> {
    if req.session_id.trim().is_empty() {
        return Err(AppError::new(ErrorCode::SessionRequired));
    }
    if req.message.trim().is_empty() {
        return Err(AppError::new(ErrorCode::MessageEmpty));
    }

    // 未注册的会话也允许发言，先补一行匿名会话
    chat_session::ensure_exists(&state.pool, &req.session_id).await?;

    let new_message =
        chat_message::append(&state.pool, &req.session_id, Sender::User, &req.message).await?;

    Ok(Json(MessageResponse {
        success: true,
        new_message,
    }))
}

/// GET /api/public/chat-messages?sessionId= - 会话消息列表
///
/// 挂件轮询入口。没有 session id 时返回空列表而不是报错，
/// 首次加载的页面还没注册也能安全轮询
pub async fn list_messages(
    State(state): State<ServerState>,
    Query(query): Query<SessionQuery>,
) -> AppResult<Json<MessagesResponse>> {
    let session_id = match query.session_id.filter(|s| !s.trim().is_empty()) {
        Some(id) => id,
        None => {
            return Ok(Json(MessagesResponse {
                success: true,
                messages: vec![],
            }));
        }
    };

    let messages = chat_message::list_by_session(&state.pool, &session_id).await?;

    Ok(Json(MessagesResponse {
        success: true,
        messages,
    }))
}
