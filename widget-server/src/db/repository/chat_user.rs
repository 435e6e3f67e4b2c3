//! Chat User Repository

use super::{RepoError, RepoResult};
use shared::models::{ChatUser, ChatUserRegister};
use sqlx::SqlitePool;

const CHAT_USER_SELECT: &str = "SELECT id, shop, email, first_name, last_name, session_id, last_active, created_at, updated_at FROM chat_user";

pub async fn find_by_shop_email(
    pool: &SqlitePool,
    shop: &str,
    email: &str,
) -> RepoResult<Option<ChatUser>> {
    let sql = format!("{} WHERE shop = ? AND email = ?", CHAT_USER_SELECT);
    let row = sqlx::query_as::<_, ChatUser>(&sql)
        .bind(shop)
        .bind(email)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

/// Register a visitor, or re-bind an existing one to a new session.
///
/// Keyed on `(shop, email)`: a returning visitor keeps their row (and
/// original name) and only the session binding and activity timestamps
/// move forward.
pub async fn upsert(pool: &SqlitePool, data: ChatUserRegister) -> RepoResult<ChatUser> {
    let now = shared::util::now_millis();
    let id = shared::util::snowflake_id();
    sqlx::query(
        "INSERT INTO chat_user (id, shop, email, first_name, last_name, session_id, last_active, created_at, updated_at) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?7, ?7) \
         ON CONFLICT(shop, email) DO UPDATE SET \
             session_id = excluded.session_id, \
             last_active = excluded.last_active, \
             updated_at = excluded.updated_at",
    )
    .bind(id)
    .bind(&data.shop)
    .bind(&data.email)
    .bind(&data.first_name)
    .bind(&data.last_name)
    .bind(&data.session_id)
    .bind(now)
    .execute(pool)
    .await?;

    find_by_shop_email(pool, &data.shop, &data.email)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to register chat user".into()))
}

/// Bump the activity timestamp for whoever owns this session
pub async fn touch_by_session(pool: &SqlitePool, session_id: &str) -> RepoResult<()> {
    let now = shared::util::now_millis();
    sqlx::query("UPDATE chat_user SET last_active = ?1 WHERE session_id = ?2")
        .bind(now)
        .bind(session_id)
        .execute(pool)
        .await?;
    Ok(())
}
