//! Chat Settings Repository

use super::{RepoError, RepoResult};
use shared::models::{ChatSettings, ChatSettingsUpdate};
use sqlx::SqlitePool;

const CHAT_SETTINGS_SELECT: &str = "SELECT shop, primary_color, accent_color, header_text, welcome_text, welcome_image_url, created_at, updated_at FROM chat_settings";

pub async fn find_by_shop(pool: &SqlitePool, shop: &str) -> RepoResult<Option<ChatSettings>> {
    let sql = format!("{} WHERE shop = ?", CHAT_SETTINGS_SELECT);
    let row = sqlx::query_as::<_, ChatSettings>(&sql)
        .bind(shop)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

/// Save settings for a shop, creating the row on first save.
///
/// The update payload is partial: absent fields keep their stored value,
/// or the documented default when no row existed yet. Merging happens in
/// Rust so the defaults live in exactly one place (`ChatSettings`).
pub async fn upsert(
    pool: &SqlitePool,
    shop: &str,
    update: ChatSettingsUpdate,
) -> RepoResult<ChatSettings> {
    let now = shared::util::now_millis();
    let mut merged = find_by_shop(pool, shop)
        .await?
        .unwrap_or_else(|| ChatSettings::defaults_for(shop, now));
    merged.apply(update);
    merged.updated_at = now;

    sqlx::query(
        "INSERT INTO chat_settings (shop, primary_color, accent_color, header_text, welcome_text, welcome_image_url, created_at, updated_at) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8) \
         ON CONFLICT(shop) DO UPDATE SET \
             primary_color = excluded.primary_color, \
             accent_color = excluded.accent_color, \
             header_text = excluded.header_text, \
             welcome_text = excluded.welcome_text, \
             welcome_image_url = excluded.welcome_image_url, \
             updated_at = excluded.updated_at",
    )
    .bind(&merged.shop)
    .bind(&merged.primary_color)
    .bind(&merged.accent_color)
    .bind(&merged.header_text)
    .bind(&merged.welcome_text)
    .bind(&merged.welcome_image_url)
    .bind(merged.created_at)
    .bind(merged.updated_at)
    .execute(pool)
    .await?;

    find_by_shop(pool, shop)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to save chat settings".into()))
}
