use crate::models;
use sqlx::PgPool;
use tracing::Instrument;
use uuid::Uuid;

pub async fn fetch(pool: &PgPool, id: Uuid) -> Result<Option<models::Place>, String> {
    tracing::info!("Fetch place {}", id);
    sqlx::query_as::<_, models::Place>(r"SELECT * FROM place WHERE id = $1 LIMIT 1")
        .bind(id)
        .fetch_optional(pool)
        .await
        .map_err(|err| {
            tracing::error!("Failed to fetch place, error: {:?}", err);
            "Could not fetch data".to_string()
        })
}

pub async fn exists(pool: &PgPool, id: Uuid) -> Result<bool, String> {
    let query_span = tracing::info_span!("Check place existence by id.");
    sqlx::query_scalar::<_, bool>(r"SELECT EXISTS(SELECT 1 FROM place WHERE id = $1)")
        .bind(id)
        .fetch_one(pool)
        .instrument(query_span)
        .await
        .map_err(|err| {
            tracing::error!("Failed to check place existence, error: {:?}", err);
            "Could not fetch data".to_string()
        })
}

/// Places with their rating aggregate, optionally of one city.
pub async fn fetch_all(pool: &PgPool, city: Option<&str>) -> Result<Vec<models::RatedPlace>, String> {
    let query_span = tracing::info_span!("Fetch places.");
    sqlx::query_as::<_, models::RatedPlace>(
        r#"
        SELECT p.*,
            COALESCE(SUM(r.value), 0)::BIGINT AS ratings_sum,
            COUNT(r.id) AS ratings_count
        FROM place p
        LEFT JOIN rating r ON r.place_id = p.id
        WHERE $1::VARCHAR IS NULL OR p.city = $1
        GROUP BY p.id
        ORDER BY p.name
        "#,
    )
    .bind(city)
    .fetch_all(pool)
    .instrument(query_span)
    .await
    .map_err(|err| {
        tracing::error!("Failed to fetch places, error: {:?}", err);
        "Could not fetch data".to_string()
    })
}

pub async fn insert(pool: &PgPool, place: models::Place) -> Result<models::Place, String> {
    let query_span = tracing::info_span!("Saving new place into the database");
    sqlx::query_as::<_, models::Place>(
        r#"
        INSERT INTO place (id, name, short, description, city, address, image, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, NOW(), NOW())
        RETURNING *
        "#,
    )
    .bind(place.id)
    .bind(&place.name)
    .bind(&place.short)
    .bind(&place.description)
    .bind(&place.city)
    .bind(&place.address)
    .bind(&place.image)
    .fetch_one(pool)
    .instrument(query_span)
    .await
    .map_err(|err| {
        tracing::error!("Failed to execute query: {:?}", err);
        "Failed to insert".to_string()
    })
}

pub async fn update(pool: &PgPool, place: models::Place) -> Result<models::Place, String> {
    let query_span = tracing::info_span!("Updating place");
    sqlx::query_as::<_, models::Place>(
        r#"
        UPDATE place
        SET
            name=$2,
            short=$3,
            description=$4,
            city=$5,
            address=$6,
            image=$7,
            updated_at=NOW()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(place.id)
    .bind(&place.name)
    .bind(&place.short)
    .bind(&place.description)
    .bind(&place.city)
    .bind(&place.address)
    .bind(&place.image)
    .fetch_one(pool)
    .instrument(query_span)
    .await
    .map_err(|err| {
        tracing::error!("Failed to execute query: {:?}", err);
        "Failed to update".to_string()
    })
}

#[tracing::instrument(name = "Delete place.", skip(pool))]
pub async fn delete(pool: &PgPool, id: Uuid) -> Result<Option<models::Place>, String> {
    sqlx::query_as::<_, models::Place>(r"DELETE FROM place WHERE id = $1 RETURNING *")
        .bind(id)
        .fetch_optional(pool)
        .await
        .map_err(|err| {
            tracing::error!("Failed to delete place, error: {:?}", err);
            "Failed to delete".to_string()
        })
}
