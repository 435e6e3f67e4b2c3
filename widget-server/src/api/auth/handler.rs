//! Authentication Handlers
//!
//! Handles merchant login, logout, and token introspection

use axum::{Extension, Json, extract::State};
use std::time::Duration;

use shared::client::{AdminInfo, LoginRequest, LoginResponse};

use crate::auth::CurrentAdmin;
use crate::core::ServerState;
use crate::db::repository::admin_account;
use crate::utils::{ApiResponse, AppError, AppResult};

/// 登录请求的固定延迟 (毫秒)
///
/// 无论成功失败都先等待，拉平爆破尝试的吞吐量。
const AUTH_FIXED_DELAY_MS: u64 = 500;

/// POST /api/auth/login - 商家登录
///
/// 校验店铺 + 用户名 + 密码，签发收件箱 JWT。
/// 用户名不存在和密码错误返回同一条消息，避免账户枚举。
pub async fn login(
    State(state): State<ServerState>,
    Json(req): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    tokio::time::sleep(Duration::from_millis(AUTH_FIXED_DELAY_MS)).await;

    let admin = admin_account::find_by_shop_username(&state.pool, &req.shop, &req.username)
        .await?
        .ok_or_else(|| {
            tracing::warn!(
                shop = %req.shop,
                username = %req.username,
                "Login attempt for unknown account"
            );
            AppError::invalid_credentials()
        })?;

    if !admin.is_active {
        return Err(AppError::forbidden("Account has been disabled".to_string()));
    }

    let password_valid = admin
        .verify_password(&req.password)
        .map_err(|e| AppError::internal(format!("Password verification failed: {}", e)))?;

    if !password_valid {
        tracing::warn!(
            shop = %admin.shop,
            username = %admin.username,
            "Login attempt with wrong password"
        );
        return Err(AppError::invalid_credentials());
    }

    let jwt_service = state.get_jwt_service();
    let token = jwt_service
        .generate_token(admin.id, &admin.username, &admin.shop, &admin.display_name)
        .map_err(|e| AppError::internal(format!("Failed to generate token: {}", e)))?;

    tracing::info!(
        admin_id = %admin.id,
        username = %admin.username,
        shop = %admin.shop,
        "Admin logged in successfully"
    );

    Ok(Json(LoginResponse {
        token,
        admin: admin.info(),
    }))
}

/// GET /api/auth/me - 当前管理员信息
///
/// 直接回显令牌里的身份，不访问数据库
pub async fn me(Extension(admin): Extension<CurrentAdmin>) -> AppResult<Json<AdminInfo>> {
    Ok(Json(AdminInfo {
        id: admin.id,
        shop: admin.shop,
        username: admin.username,
        display_name: admin.display_name,
    }))
}

/// POST /api/auth/logout - 登出
///
/// JWT 无状态，服务端只记录日志；令牌由客户端丢弃
pub async fn logout(
    Extension(admin): Extension<CurrentAdmin>,
) -> AppResult<Json<ApiResponse<()>>> {
    tracing::info!(
        admin_id = %admin.id,
        username = %admin.username,
        shop = %admin.shop,
        "Admin logged out"
    );

    Ok(Json(ApiResponse::success(())))
}
