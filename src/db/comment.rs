use crate::models;
use sqlx::PgPool;
use tracing::Instrument;
use uuid::Uuid;

pub async fn fetch(pool: &PgPool, id: Uuid) -> Result<Option<models::Comment>, String> {
    let query_span = tracing::info_span!("Fetch comment by id.");
    sqlx::query_as::<_, models::Comment>(r"SELECT * FROM comment WHERE id = $1 LIMIT 1")
        .bind(id)
        .fetch_optional(pool)
        .instrument(query_span)
        .await
        .map_err(|err| {
            tracing::error!("Failed to fetch comment, error: {:?}", err);
            "Could not fetch data".to_string()
        })
}

pub async fn fetch_by_product(
    pool: &PgPool,
    product_id: Uuid,
) -> Result<Vec<models::Comment>, String> {
    let query_span = tracing::info_span!("Fetch comments of product.");
    sqlx::query_as::<_, models::Comment>(
        r"SELECT * FROM comment WHERE product_id = $1 ORDER BY created_at DESC",
    )
    .bind(product_id)
    .fetch_all(pool)
    .instrument(query_span)
    .await
    .map_err(|err| {
        tracing::error!("Failed to fetch comments, error: {:?}", err);
        "Could not fetch data".to_string()
    })
}

pub async fn insert(pool: &PgPool, comment: models::Comment) -> Result<models::Comment, String> {
    let query_span = tracing::info_span!("Saving new comment into the database");
    sqlx::query_as::<_, models::Comment>(
        r#"
        INSERT INTO comment (id, user_id, product_id, text, media, created_at)
        VALUES ($1, $2, $3, $4, $5, NOW())
        RETURNING *
        "#,
    )
    .bind(comment.id)
    .bind(comment.user_id)
    .bind(comment.product_id)
    .bind(&comment.text)
    .bind(&comment.media)
    .fetch_one(pool)
    .instrument(query_span)
    .await
    .map_err(|err| {
        tracing::error!("Failed to execute query: {:?}", err);
        "Failed to insert".to_string()
    })
}

#[tracing::instrument(name = "Delete comment.", skip(pool))]
pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool, String> {
    sqlx::query(r"DELETE FROM comment WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await
        .map(|result| result.rows_affected() > 0)
        .map_err(|err| {
            tracing::error!("Failed to delete comment, error: {:?}", err);
            "Failed to delete".to_string()
        })
}

/// Appends `key` only while the comment still holds `expected_len` media keys,
/// so two uploads can never claim the same slot.
pub async fn append_media(
    pool: &PgPool,
    id: Uuid,
    expected_len: i32,
    key: &str,
) -> Result<Option<models::Comment>, String> {
    let query_span = tracing::info_span!("Append comment media.");
    sqlx::query_as::<_, models::Comment>(
        r#"
        UPDATE comment SET media = array_append(media, $3)
        WHERE id = $1 AND cardinality(media) = $2
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(expected_len)
    .bind(key)
    .fetch_optional(pool)
    .instrument(query_span)
    .await
    .map_err(|err| {
        tracing::error!("Failed to append comment media, error: {:?}", err);
        "Failed to update".to_string()
    })
}

pub async fn remove_media(pool: &PgPool, id: Uuid, key: &str) -> Result<(), String> {
    let query_span = tracing::info_span!("Remove comment media.");
    sqlx::query(r"UPDATE comment SET media = array_remove(media, $2) WHERE id = $1")
        .bind(id)
        .bind(key)
        .execute(pool)
        .instrument(query_span)
        .await
        .map(|_| ())
        .map_err(|err| {
            tracing::error!("Failed to remove comment media, error: {:?}", err);
            "Failed to update".to_string()
        })
}
