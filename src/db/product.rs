use crate::models;
use sqlx::PgPool;
use tracing::Instrument;
use uuid::Uuid;

pub async fn fetch(pool: &PgPool, id: Uuid) -> Result<Option<models::Product>, String> {
    tracing::info!("Fetch product {}", id);
    sqlx::query_as::<_, models::Product>(r"SELECT * FROM product WHERE id = $1 LIMIT 1")
        .bind(id)
        .fetch_optional(pool)
        .await
        .map_err(|err| {
            tracing::error!("Failed to fetch product, error: {:?}", err);
            "Could not fetch data".to_string()
        })
}

pub async fn exists(pool: &PgPool, id: Uuid) -> Result<bool, String> {
    let query_span = tracing::info_span!("Check product existence by id.");
    sqlx::query_scalar::<_, bool>(r"SELECT EXISTS(SELECT 1 FROM product WHERE id = $1)")
        .bind(id)
        .fetch_one(pool)
        .instrument(query_span)
        .await
        .map_err(|err| {
            tracing::error!("Failed to check product existence, error: {:?}", err);
            "Could not fetch data".to_string()
        })
}

/// Active products with their rating aggregate, optionally of one category.
pub async fn fetch_active(
    pool: &PgPool,
    product_type: Option<models::ProductType>,
) -> Result<Vec<models::RatedProduct>, String> {
    let query_span = tracing::info_span!("Fetch active products.");
    sqlx::query_as::<_, models::RatedProduct>(
        r#"
        SELECT p.*,
            COALESCE(SUM(r.value), 0)::BIGINT AS ratings_sum,
            COUNT(r.id) AS ratings_count
        FROM product p
        LEFT JOIN rating r ON r.product_id = p.id
        WHERE p.active AND ($1::VARCHAR IS NULL OR p.product_type = $1)
        GROUP BY p.id
        ORDER BY p.created_at DESC
        "#,
    )
    .bind(product_type.map(|kind| kind.as_str()))
    .fetch_all(pool)
    .instrument(query_span)
    .await
    .map_err(|err| {
        tracing::error!("Failed to fetch products, error: {:?}", err);
        "Could not fetch data".to_string()
    })
}

pub async fn fetch_all(pool: &PgPool) -> Result<Vec<models::Product>, String> {
    let query_span = tracing::info_span!("Fetch all products.");
    sqlx::query_as::<_, models::Product>(r"SELECT * FROM product ORDER BY created_at DESC")
        .fetch_all(pool)
        .instrument(query_span)
        .await
        .map_err(|err| {
            tracing::error!("Failed to fetch products, error: {:?}", err);
            "Could not fetch data".to_string()
        })
}

pub async fn fetch_favorites(
    pool: &PgPool,
    user_id: Uuid,
) -> Result<Vec<models::RatedProduct>, String> {
    let query_span = tracing::info_span!("Fetch favorite products of user.");
    sqlx::query_as::<_, models::RatedProduct>(
        r#"
        SELECT p.*,
            COALESCE(SUM(r.value), 0)::BIGINT AS ratings_sum,
            COUNT(r.id) AS ratings_count
        FROM product p
        JOIN favorite_product f ON f.product_id = p.id
        LEFT JOIN rating r ON r.product_id = p.id
        WHERE f.user_id = $1
        GROUP BY p.id, f.created_at
        ORDER BY f.created_at DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .instrument(query_span)
    .await
    .map_err(|err| {
        tracing::error!("Failed to fetch favorites, error: {:?}", err);
        "Could not fetch data".to_string()
    })
}

pub async fn insert(pool: &PgPool, product: models::Product) -> Result<models::Product, String> {
    let query_span = tracing::info_span!("Saving new product into the database");
    sqlx::query_as::<_, models::Product>(
        r#"
        INSERT INTO product (id, name, short, description, product_type, active, image, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, NOW(), NOW())
        RETURNING *
        "#,
    )
    .bind(product.id)
    .bind(&product.name)
    .bind(&product.short)
    .bind(&product.description)
    .bind(product.product_type.as_str())
    .bind(product.active)
    .bind(&product.image)
    .fetch_one(pool)
    .instrument(query_span)
    .await
    .map_err(|err| {
        tracing::error!("Failed to execute query: {:?}", err);
        "Failed to insert".to_string()
    })
}

pub async fn update(pool: &PgPool, product: models::Product) -> Result<models::Product, String> {
    let query_span = tracing::info_span!("Updating product");
    sqlx::query_as::<_, models::Product>(
        r#"
        UPDATE product
        SET
            name=$2,
            short=$3,
            description=$4,
            product_type=$5,
            active=$6,
            image=$7,
            updated_at=NOW()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(product.id)
    .bind(&product.name)
    .bind(&product.short)
    .bind(&product.description)
    .bind(product.product_type.as_str())
    .bind(product.active)
    .bind(&product.image)
    .fetch_one(pool)
    .instrument(query_span)
    .await
    .map_err(|err| {
        tracing::error!("Failed to execute query: {:?}", err);
        "Failed to update".to_string()
    })
}

#[tracing::instrument(name = "Delete product.", skip(pool))]
pub async fn delete(pool: &PgPool, id: Uuid) -> Result<Option<models::Product>, String> {
    sqlx::query_as::<_, models::Product>(r"DELETE FROM product WHERE id = $1 RETURNING *")
        .bind(id)
        .fetch_optional(pool)
        .await
        .map_err(|err| {
            tracing::error!("Failed to delete product, error: {:?}", err);
            "Failed to delete".to_string()
        })
}
