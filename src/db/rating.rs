use crate::models::{self, RatingTarget};
use sqlx::PgPool;
use tracing::Instrument;
use uuid::Uuid;

#[derive(Debug, sqlx::FromRow)]
pub struct UpsertedRating {
    #[sqlx(flatten)]
    pub rating: models::Rating,
    /// `false` when an existing vote was overwritten
    pub inserted: bool,
}

pub async fn fetch(pool: &PgPool, id: Uuid) -> Result<Option<models::Rating>, String> {
    let query_span = tracing::info_span!("Fetch rating by id.");
    sqlx::query_as::<_, models::Rating>(r"SELECT * FROM rating WHERE id = $1 LIMIT 1")
        .bind(id)
        .fetch_optional(pool)
        .instrument(query_span)
        .await
        .map_err(|err| {
            tracing::error!("Failed to fetch rating, error: {:?}", err);
            "Could not fetch data".to_string()
        })
}

pub async fn fetch_by_user_and_target(
    pool: &PgPool,
    user_id: Uuid,
    target: RatingTarget,
) -> Result<Option<models::Rating>, String> {
    let query_span = tracing::info_span!("Search for existing vote.");
    let sql = match target {
        RatingTarget::Product(_) => {
            r"SELECT * FROM rating WHERE user_id = $1 AND product_id = $2 LIMIT 1"
        }
        RatingTarget::Place(_) => {
            r"SELECT * FROM rating WHERE user_id = $1 AND place_id = $2 LIMIT 1"
        }
    };

    sqlx::query_as::<_, models::Rating>(sql)
        .bind(user_id)
        .bind(target.id())
        .fetch_optional(pool)
        .instrument(query_span)
        .await
        .map_err(|err| {
            tracing::error!("Failed to fetch rating, error: {:?}", err);
            "Could not fetch data".to_string()
        })
}

pub async fn fetch_by_user(pool: &PgPool, user_id: Uuid) -> Result<Vec<models::Rating>, String> {
    let query_span = tracing::info_span!("Fetch ratings of user.");
    sqlx::query_as::<_, models::Rating>(
        r"SELECT * FROM rating WHERE user_id = $1 ORDER BY updated_at DESC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .instrument(query_span)
    .await
    .map_err(|err| {
        tracing::error!("Failed to fetch ratings, error: {:?}", err);
        "Could not fetch data".to_string()
    })
}

/// Inserts the vote or overwrites the value of the existing one in one statement.
pub async fn upsert(
    pool: &PgPool,
    user_id: Uuid,
    target: RatingTarget,
    value: i16,
) -> Result<UpsertedRating, String> {
    let query_span = tracing::info_span!("Saving rating into the database");
    let sql = match target {
        RatingTarget::Product(_) => {
            r#"
            INSERT INTO rating (id, value, user_id, product_id, created_at, updated_at)
            VALUES ($1, $2, $3, $4, NOW(), NOW())
            ON CONFLICT (user_id, product_id)
            DO UPDATE SET value = EXCLUDED.value, updated_at = NOW()
            RETURNING *, (xmax = 0) AS inserted
            "#
        }
        RatingTarget::Place(_) => {
            r#"
            INSERT INTO rating (id, value, user_id, place_id, created_at, updated_at)
            VALUES ($1, $2, $3, $4, NOW(), NOW())
            ON CONFLICT (user_id, place_id)
            DO UPDATE SET value = EXCLUDED.value, updated_at = NOW()
            RETURNING *, (xmax = 0) AS inserted
            "#
        }
    };

    sqlx::query_as::<_, UpsertedRating>(sql)
        .bind(Uuid::new_v4())
        .bind(value)
        .bind(user_id)
        .bind(target.id())
        .fetch_one(pool)
        .instrument(query_span)
        .await
        .map_err(|err| {
            tracing::error!("Failed to execute query: {:?}", err);
            "Failed to save rating".to_string()
        })
}

pub async fn delete_by_user_and_target(
    pool: &PgPool,
    user_id: Uuid,
    target: RatingTarget,
) -> Result<bool, String> {
    let query_span = tracing::info_span!("Removing vote");
    let sql = match target {
        RatingTarget::Product(_) => r"DELETE FROM rating WHERE user_id = $1 AND product_id = $2",
        RatingTarget::Place(_) => r"DELETE FROM rating WHERE user_id = $1 AND place_id = $2",
    };

    sqlx::query(sql)
        .bind(user_id)
        .bind(target.id())
        .execute(pool)
        .instrument(query_span)
        .await
        .map(|result| result.rows_affected() > 0)
        .map_err(|err| {
            tracing::error!("Failed to execute query: {:?}", err);
            "Failed to delete".to_string()
        })
}

#[tracing::instrument(name = "Delete rating.", skip(pool))]
pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool, String> {
    sqlx::query(r"DELETE FROM rating WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await
        .map(|result| result.rows_affected() > 0)
        .map_err(|err| {
            tracing::error!("Failed to delete rating, error: {:?}", err);
            "Failed to delete".to_string()
        })
}

pub async fn summary(pool: &PgPool, target: RatingTarget) -> Result<models::RatingSummary, String> {
    let query_span = tracing::info_span!("Aggregate ratings.");
    let sql = match target {
        RatingTarget::Product(_) => {
            r#"
            SELECT COALESCE(SUM(value), 0)::BIGINT AS ratings_sum, COUNT(*) AS ratings_count
            FROM rating
            WHERE product_id = $1
            "#
        }
        RatingTarget::Place(_) => {
            r#"
            SELECT COALESCE(SUM(value), 0)::BIGINT AS ratings_sum, COUNT(*) AS ratings_count
            FROM rating
            WHERE place_id = $1
            "#
        }
    };

    sqlx::query_as::<_, models::RatingSummary>(sql)
        .bind(target.id())
        .fetch_one(pool)
        .instrument(query_span)
        .await
        .map_err(|err| {
            tracing::error!("Failed to aggregate ratings, error: {:?}", err);
            "Could not fetch data".to_string()
        })
}
