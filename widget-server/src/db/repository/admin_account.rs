//! Admin Account Repository

use super::{RepoError, RepoResult};
use crate::db::models::{AdminAccount, AdminAccountCreate};
use sqlx::SqlitePool;

const ADMIN_ACCOUNT_SELECT: &str = "SELECT id, shop, username, display_name, password_hash, is_active, created_at, updated_at FROM admin_account";

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<AdminAccount>> {
    let sql = format!("{} WHERE id = ?", ADMIN_ACCOUNT_SELECT);
    let row = sqlx::query_as::<_, AdminAccount>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn find_by_shop_username(
    pool: &SqlitePool,
    shop: &str,
    username: &str,
) -> RepoResult<Option<AdminAccount>> {
    let sql = format!("{} WHERE shop = ? AND username = ?", ADMIN_ACCOUNT_SELECT);
    let row = sqlx::query_as::<_, AdminAccount>(&sql)
        .bind(shop)
        .bind(username)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

/// Create an admin account. Username is unique per shop.
pub async fn create(pool: &SqlitePool, data: AdminAccountCreate) -> RepoResult<AdminAccount> {
    let password_hash = AdminAccount::hash_password(&data.password)
        .map_err(|e| RepoError::Database(format!("Failed to hash password: {e}")))?;
    let display_name = data.display_name.unwrap_or_else(|| data.username.clone());
    let now = shared::util::now_millis();
    let id = shared::util::snowflake_id();

    sqlx::query(
        "INSERT INTO admin_account (id, shop, username, display_name, password_hash, is_active, created_at, updated_at) \
         VALUES (?1, ?2, ?3, ?4, ?5, 1, ?6, ?6)",
    )
    .bind(id)
    .bind(&data.shop)
    .bind(&data.username)
    .bind(&display_name)
    .bind(&password_hash)
    .bind(now)
    .execute(pool)
    .await?;

    find_by_shop_username(pool, &data.shop, &data.username)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create admin account".into()))
}
