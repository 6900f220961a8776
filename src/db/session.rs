use crate::models;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::Instrument;
use uuid::Uuid;

pub async fn insert(
    pool: &PgPool,
    id: &str,
    user_id: Uuid,
    expires_at: DateTime<Utc>,
) -> Result<models::Session, String> {
    let query_span = tracing::info_span!("Saving new session");
    sqlx::query_as::<_, models::Session>(
        r#"
        INSERT INTO user_session (id, user_id, expires_at, created_at)
        VALUES ($1, $2, $3, NOW())
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(user_id)
    .bind(expires_at)
    .fetch_one(pool)
    .instrument(query_span)
    .await
    .map_err(|err| {
        tracing::error!("Failed to execute query: {:?}", err);
        "Failed to insert".to_string()
    })
}

/// Resolves a live session token to its user.
pub async fn fetch_user(pool: &PgPool, id: &str) -> Result<Option<models::User>, String> {
    let query_span = tracing::info_span!("Fetching the user by session");
    sqlx::query_as::<_, models::User>(
        r#"
        SELECT u.*
        FROM app_user u
        JOIN user_session s ON s.user_id = u.id
        WHERE s.id = $1 AND s.expires_at > NOW()
        LIMIT 1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .instrument(query_span)
    .await
    .map_err(|err| {
        tracing::error!("Failed to execute fetch query: {:?}", err);
        "Could not fetch data".to_string()
    })
}

pub async fn delete(pool: &PgPool, id: &str) -> Result<(), String> {
    let query_span = tracing::info_span!("Deleting session");
    sqlx::query(r"DELETE FROM user_session WHERE id = $1 OR expires_at <= NOW()")
        .bind(id)
        .execute(pool)
        .instrument(query_span)
        .await
        .map(|_| ())
        .map_err(|err| {
            tracing::error!("Failed to execute query: {:?}", err);
            "Failed to delete".to_string()
        })
}
