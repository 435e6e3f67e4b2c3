//! Inbox API Handlers
//!
//! 商家收件箱处理器。会话归属检查失败时按不存在处理 (404)，
//! 不向其他店铺泄露会话是否存在。

use axum::{
    Extension, Json,
    extract::{Query, State},
};
use serde::Deserialize;

use shared::client::{MessageResponse, ReplyRequest};
use shared::models::{
    ChatMessage, ChatSession, ChatSessionPreview, ChatSettingsUpdate, ChatSettingsView, Sender,
};

use crate::auth::CurrentAdmin;
use crate::core::ServerState;
use crate::db::repository::{chat_message, chat_session, chat_settings};
use crate::utils::{AppError, AppResult, ErrorCode};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionQuery {
    pub session_id: Option<String>,
}

/// 解析会话归属，其他店铺的会话一律按不存在处理
async fn owned_session(
    state: &ServerState,
    admin: &CurrentAdmin,
    session_id: &str,
) -> AppResult<ChatSession> {
    chat_session::find_owned(&state.pool, &admin.shop, session_id)
        .await?
        .ok_or_else(|| AppError::session_not_found(session_id))
}

/// GET /api/admin/chat-sessions - 本店铺会话列表
///
/// 只包含已注册 (绑定过店铺) 的会话，带最后一条消息预览
pub async fn list_sessions(
    State(state): State<ServerState>,
    Extension(admin): Extension<CurrentAdmin>,
) -> AppResult<Json<Vec<ChatSessionPreview>>> {
    let sessions = chat_session::list_for_shop(&state.pool, &admin.shop).await?;
    Ok(Json(sessions))
}

/// GET /api/admin/chat-messages?sessionId= - 会话完整消息记录
pub async fn list_messages(
    State(state): State<ServerState>,
    Extension(admin): Extension<CurrentAdmin>,
    Query(query): Query<SessionQuery>,
) -> AppResult<Json<Vec<ChatMessage>>> {
    let session_id = query
        .session_id
        .filter(|s| !s.trim().is_empty())
        .ok_or_else(|| AppError::new(ErrorCode::SessionRequired))?;

    let session = owned_session(&state, &admin, &session_id).await?;

    let messages = chat_message::list_by_session(&state.pool, &session.session_id).await?;
    Ok(Json(messages))
}

/// POST /api/admin/chat-reply - 客服回复
///
/// 消息以 `admin` 方向写入，访客下次轮询时取到
pub async fn reply(
    State(state): State<ServerState>,
    Extension(admin): Extension<CurrentAdmin>,
    Json(req): Json<ReplyRequest>,
) -> AppResult<Json<MessageResponse>> {
    if req.session_id.trim().is_empty() {
        return Err(AppError::new(ErrorCode::SessionRequired));
    }
    if req.message.trim().is_empty() {
        return Err(AppError::new(ErrorCode::MessageEmpty));
    }

    let session = owned_session(&state, &admin, &req.session_id).await?;

    let new_message = chat_message::append(
        &state.pool,
        &session.session_id,
        Sender::Admin,
        &req.message,
    )
    .await?;

    tracing::debug!(
        admin_id = %admin.id,
        session_id = %session.session_id,
        "Admin reply stored"
    );

    Ok(Json(MessageResponse {
        success: true,
        new_message,
    }))
}

/// GET /api/admin/chat-settings - 本店铺挂件外观配置
///
/// 尚未保存过时返回默认值，和店面侧看到的一致
pub async fn get_settings(
    State(state): State<ServerState>,
    Extension(admin): Extension<CurrentAdmin>,
) -> AppResult<Json<ChatSettingsView>> {
    let view = match chat_settings::find_by_shop(&state.pool, &admin.shop).await? {
        Some(settings) => ChatSettingsView::from(settings),
        None => ChatSettingsView::defaults_for(&admin.shop),
    };
    Ok(Json(view))
}

/// POST /api/admin/chat-settings - 保存挂件外观配置
///
/// 部分更新：缺失的字段保留当前值 (首次保存时是默认值)
pub async fn update_settings(
    State(state): State<ServerState>,
    Extension(admin): Extension<CurrentAdmin>,
    Json(update): Json<ChatSettingsUpdate>,
) -> AppResult<Json<ChatSettingsView>> {
    let saved = chat_settings::upsert(&state.pool, &admin.shop, update).await?;

    tracing::info!(
        admin_id = %admin.id,
        shop = %admin.shop,
        "Widget settings updated"
    );

    Ok(Json(ChatSettingsView::from(saved)))
}
