//! Chat Message Repository

use super::RepoResult;
use shared::models::{ChatMessage, Sender};
use sqlx::SqlitePool;

/// Append a message to a session transcript.
///
/// The sender is decided by the calling handler (public endpoint always
/// stamps `user`, inbox reply always stamps `admin`), never by request
/// input.
pub async fn append(
    pool: &SqlitePool,
    session_id: &str,
    sender: Sender,
    message: &str,
) -> RepoResult<ChatMessage> {
    let now = shared::util::now_millis();
    let id = shared::util::snowflake_id();
    sqlx::query(
        "INSERT INTO chat_message (id, session_id, sender, message, created_at) VALUES (?1, ?2, ?3, ?4, ?5)",
    )
    .bind(id)
    .bind(session_id)
    .bind(sender.as_str())
    .bind(message)
    .bind(now)
    .execute(pool)
    .await?;

    Ok(ChatMessage {
        id,
        session_id: session_id.to_string(),
        sender,
        message: message.to_string(),
        created_at: now,
    })
}

/// Full transcript in chronological order.
///
/// `id` breaks ties between messages stamped in the same millisecond,
/// and snowflake IDs embed the timestamp in their high bits, so the
/// order is stable across polls.
pub async fn list_by_session(pool: &SqlitePool, session_id: &str) -> RepoResult<Vec<ChatMessage>> {
    let rows = sqlx::query_as::<_, ChatMessage>(
        "SELECT id, session_id, sender, message, created_at FROM chat_message WHERE session_id = ? ORDER BY created_at ASC, id ASC",
    )
    .bind(session_id)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}
