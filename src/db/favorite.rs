use sqlx::PgPool;
use tracing::Instrument;
use uuid::Uuid;

/// Returns `true` when the association did not exist before.
pub async fn add(pool: &PgPool, user_id: Uuid, product_id: Uuid) -> Result<bool, String> {
    let query_span = tracing::info_span!("Adding product to favorites");
    sqlx::query(
        r#"
        INSERT INTO favorite_product (user_id, product_id, created_at)
        VALUES ($1, $2, NOW())
        ON CONFLICT DO NOTHING
        "#,
    )
    .bind(user_id)
    .bind(product_id)
    .execute(pool)
    .instrument(query_span)
    .await
    .map(|result| result.rows_affected() > 0)
    .map_err(|err| {
        tracing::error!("Failed to execute query: {:?}", err);
        "Failed to add favorite".to_string()
    })
}

/// Returns `true` when an association was removed.
pub async fn remove(pool: &PgPool, user_id: Uuid, product_id: Uuid) -> Result<bool, String> {
    let query_span = tracing::info_span!("Removing product from favorites");
    sqlx::query(r"DELETE FROM favorite_product WHERE user_id = $1 AND product_id = $2")
        .bind(user_id)
        .bind(product_id)
        .execute(pool)
        .instrument(query_span)
        .await
        .map(|result| result.rows_affected() > 0)
        .map_err(|err| {
            tracing::error!("Failed to execute query: {:?}", err);
            "Failed to remove favorite".to_string()
        })
}

pub async fn is_favorite(pool: &PgPool, user_id: Uuid, product_id: Uuid) -> Result<bool, String> {
    let query_span = tracing::info_span!("Check favorite.");
    sqlx::query_scalar::<_, bool>(
        r"SELECT EXISTS(SELECT 1 FROM favorite_product WHERE user_id = $1 AND product_id = $2)",
    )
    .bind(user_id)
    .bind(product_id)
    .fetch_one(pool)
    .instrument(query_span)
    .await
    .map_err(|err| {
        tracing::error!("Failed to check favorite, error: {:?}", err);
        "Could not fetch data".to_string()
    })
}
