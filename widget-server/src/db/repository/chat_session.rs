//! Chat Session Repository

use super::RepoResult;
use shared::models::{ChatSession, ChatSessionPreview};
use sqlx::SqlitePool;

const CHAT_SESSION_SELECT: &str =
    "SELECT session_id, shop, email, created_at FROM chat_session";

pub async fn find_by_id(pool: &SqlitePool, session_id: &str) -> RepoResult<Option<ChatSession>> {
    let sql = format!("{} WHERE session_id = ?", CHAT_SESSION_SELECT);
    let row = sqlx::query_as::<_, ChatSession>(&sql)
        .bind(session_id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

/// Look up a session only if it belongs to the given shop
pub async fn find_owned(
    pool: &SqlitePool,
    shop: &str,
    session_id: &str,
) -> RepoResult<Option<ChatSession>> {
    let sql = format!("{} WHERE session_id = ? AND shop = ?", CHAT_SESSION_SELECT);
    let row = sqlx::query_as::<_, ChatSession>(&sql)
        .bind(session_id)
        .bind(shop)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

/// Create the session row if it does not exist yet (identity stays NULL)
pub async fn ensure_exists(pool: &SqlitePool, session_id: &str) -> RepoResult<()> {
    let now = shared::util::now_millis();
    sqlx::query(
        "INSERT OR IGNORE INTO chat_session (session_id, shop, email, created_at) VALUES (?1, NULL, NULL, ?2)",
    )
    .bind(session_id)
    .bind(now)
    .execute(pool)
    .await?;
    Ok(())
}

/// Attach shop and email to a session at registration time.
///
/// Messages may arrive before registration, so the row might already
/// exist with NULL identity; the upsert covers both orders of arrival.
pub async fn bind_identity(
    pool: &SqlitePool,
    session_id: &str,
    shop: &str,
    email: &str,
) -> RepoResult<()> {
    let now = shared::util::now_millis();
    sqlx::query(
        "INSERT INTO chat_session (session_id, shop, email, created_at) \
         VALUES (?1, ?2, ?3, ?4) \
         ON CONFLICT(session_id) DO UPDATE SET \
             shop = excluded.shop, \
             email = excluded.email",
    )
    .bind(session_id)
    .bind(shop)
    .bind(email)
    .bind(now)
    .execute(pool)
    .await?;
    Ok(())
}

/// Inbox list: every registered session for a shop with its latest message.
///
/// Sessions that never registered (NULL shop) are invisible here by
/// construction of the WHERE clause.
pub async fn list_for_shop(pool: &SqlitePool, shop: &str) -> RepoResult<Vec<ChatSessionPreview>> {
    // TODO: sort on last_message_at once the inbox client orders by
    // activity; today it renders in session creation order.
    let rows = sqlx::query_as::<_, ChatSessionPreview>(
        "SELECT s.session_id, s.shop, s.email, s.created_at, \
                m.message AS last_message, m.sender AS last_sender, m.created_at AS last_message_at \
         FROM chat_session s \
         LEFT JOIN chat_message m ON m.id = ( \
             SELECT id FROM chat_message \
             WHERE session_id = s.session_id \
             ORDER BY created_at DESC, id DESC LIMIT 1 \
         ) \
         WHERE s.shop = ? \
         ORDER BY s.created_at DESC",
    )
    .bind(shop)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::Sender;
    use sqlx::sqlite::SqlitePoolOptions;

    /// Create an in-memory SQLite pool with session + message schema.
    async fn test_pool() -> SqlitePool {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();

        sqlx::query(
            "CREATE TABLE chat_session (
                session_id TEXT PRIMARY KEY,
                shop TEXT,
                email TEXT,
                created_at INTEGER NOT NULL DEFAULT 0
            )",
        )
        .execute(&pool)
        .await
        .unwrap();

        sqlx::query(
            "CREATE TABLE chat_message (
                id INTEGER PRIMARY KEY,
                session_id TEXT NOT NULL,
                sender TEXT NOT NULL,
                message TEXT NOT NULL,
                created_at INTEGER NOT NULL DEFAULT 0
            )",
        )
        .execute(&pool)
        .await
        .unwrap();

        pool
    }

    async fn seed_message(pool: &SqlitePool, id: i64, session: &str, sender: &str, text: &str, at: i64) {
        sqlx::query(
            "INSERT INTO chat_message (id, session_id, sender, message, created_at) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(id)
        .bind(session)
        .bind(sender)
        .bind(text)
        .bind(at)
        .execute(pool)
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn test_ensure_exists_is_idempotent() {
        let pool = test_pool().await;
        ensure_exists(&pool, "sess_1").await.unwrap();
        ensure_exists(&pool, "sess_1").await.unwrap();

        let session = find_by_id(&pool, "sess_1").await.unwrap().unwrap();
        assert_eq!(session.session_id, "sess_1");
        assert!(session.shop.is_none());
        assert!(session.email.is_none());
    }

    #[tokio::test]
    async fn test_bind_identity_after_anonymous_message() {
        let pool = test_pool().await;
        // Visitor sent a message before filling the contact form
        ensure_exists(&pool, "sess_1").await.unwrap();

        bind_identity(&pool, "sess_1", "demo.myshopify.com", "ana@example.com")
            .await
            .unwrap();

        let session = find_by_id(&pool, "sess_1").await.unwrap().unwrap();
        assert_eq!(session.shop.as_deref(), Some("demo.myshopify.com"));
        assert_eq!(session.email.as_deref(), Some("ana@example.com"));
    }

    #[tokio::test]
    async fn test_bind_identity_creates_row_when_missing() {
        let pool = test_pool().await;
        bind_identity(&pool, "sess_2", "demo.myshopify.com", "ana@example.com")
            .await
            .unwrap();

        let session = find_by_id(&pool, "sess_2").await.unwrap().unwrap();
        assert_eq!(session.shop.as_deref(), Some("demo.myshopify.com"));
    }

    #[tokio::test]
    async fn test_find_owned_rejects_other_shop() {
        let pool = test_pool().await;
        bind_identity(&pool, "sess_1", "demo.myshopify.com", "ana@example.com")
            .await
            .unwrap();

        assert!(
            find_owned(&pool, "demo.myshopify.com", "sess_1")
                .await
                .unwrap()
                .is_some()
        );
        assert!(
            find_owned(&pool, "other.myshopify.com", "sess_1")
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_list_for_shop_includes_last_message() {
        let pool = test_pool().await;
        bind_identity(&pool, "sess_1", "demo.myshopify.com", "ana@example.com")
            .await
            .unwrap();
        seed_message(&pool, 1, "sess_1", "user", "hello", 1000).await;
        seed_message(&pool, 2, "sess_1", "admin", "hi Ana", 2000).await;

        let previews = list_for_shop(&pool, "demo.myshopify.com").await.unwrap();
        assert_eq!(previews.len(), 1);
        assert_eq!(previews[0].last_message.as_deref(), Some("hi Ana"));
        assert_eq!(previews[0].last_sender, Some(Sender::Admin));
        assert_eq!(previews[0].last_message_at, Some(2000));
    }

    #[tokio::test]
    async fn test_list_for_shop_hides_unregistered_sessions() {
        let pool = test_pool().await;
        // Anonymous session: visible to nobody until it registers
        ensure_exists(&pool, "sess_anon").await.unwrap();
        bind_identity(&pool, "sess_1", "demo.myshopify.com", "ana@example.com")
            .await
            .unwrap();

        let previews = list_for_shop(&pool, "demo.myshopify.com").await.unwrap();
        assert_eq!(previews.len(), 1);
        assert_eq!(previews[0].session_id, "sess_1");
    }

    #[tokio::test]
    async fn test_list_for_shop_is_tenant_scoped() {
        let pool = test_pool().await;
        bind_identity(&pool, "sess_1", "demo.myshopify.com", "ana@example.com")
            .await
            .unwrap();
        bind_identity(&pool, "sess_2", "other.myshopify.com", "bob@example.com")
            .await
            .unwrap();

        let demo = list_for_shop(&pool, "demo.myshopify.com").await.unwrap();
        let other = list_for_shop(&pool, "other.myshopify.com").await.unwrap();
        assert_eq!(demo.len(), 1);
        assert_eq!(other.len(), 1);
        assert_eq!(demo[0].session_id, "sess_1");
        assert_eq!(other[0].session_id, "sess_2");
    }

    #[tokio::test]
    async fn test_list_for_shop_newest_first() {
        let pool = test_pool().await;
        sqlx::query(
            "INSERT INTO chat_session (session_id, shop, email, created_at) VALUES \
             ('sess_old', 'demo.myshopify.com', 'a@example.com', 1000), \
             ('sess_new', 'demo.myshopify.com', 'b@example.com', 2000)",
        )
        .execute(&pool)
        .await
        .unwrap();

        let previews = list_for_shop(&pool, "demo.myshopify.com").await.unwrap();
        assert_eq!(previews[0].session_id, "sess_new");
        assert_eq!(previews[1].session_id, "sess_old");
    }
}
