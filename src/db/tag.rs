use crate::models;
use sqlx::PgPool;
use tracing::Instrument;
use uuid::Uuid;

pub async fn fetch_by_product(pool: &PgPool, product_id: Uuid) -> Result<Vec<models::Tag>, String> {
    let query_span = tracing::info_span!("Fetch tags of product.");
    sqlx::query_as::<_, models::Tag>(
        r#"
        SELECT t.id, t.name
        FROM tag t
        JOIN product_tag pt ON pt.tag_id = t.id
        WHERE pt.product_id = $1
        ORDER BY t.name
        "#,
    )
    .bind(product_id)
    .fetch_all(pool)
    .instrument(query_span)
    .await
    .map_err(|err| {
        tracing::error!("Failed to fetch tags, error: {:?}", err);
        "Could not fetch data".to_string()
    })
}

/// Replaces the tag set of a product, creating unknown tags by name.
#[tracing::instrument(name = "Replace product tags.", skip(pool))]
pub async fn replace_for_product(
    pool: &PgPool,
    product_id: Uuid,
    names: &[String],
) -> Result<Vec<models::Tag>, String> {
    let mut tx = pool.begin().await.map_err(|err| {
        tracing::error!("Failed to begin transaction: {:?}", err);
        "Failed to update tags".to_string()
    })?;

    sqlx::query(r"DELETE FROM product_tag WHERE product_id = $1")
        .bind(product_id)
        .execute(&mut *tx)
        .await
        .map_err(|err| {
            tracing::error!("Failed to clear product tags: {:?}", err);
            "Failed to update tags".to_string()
        })?;

    let mut tags = Vec::with_capacity(names.len());
    for name in names {
        // the no-op update makes RETURNING yield the existing row too
        let tag = sqlx::query_as::<_, models::Tag>(
            r#"
            INSERT INTO tag (id, name) VALUES ($1, $2)
            ON CONFLICT (name) DO UPDATE SET name = EXCLUDED.name
            RETURNING id, name
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(name)
        .fetch_one(&mut *tx)
        .await
        .map_err(|err| {
            tracing::error!("Failed to save tag {}: {:?}", name, err);
            "Failed to update tags".to_string()
        })?;

        sqlx::query(
            r"INSERT INTO product_tag (product_id, tag_id) VALUES ($1, $2) ON CONFLICT DO NOTHING",
        )
        .bind(product_id)
        .bind(tag.id)
        .execute(&mut *tx)
        .await
        .map_err(|err| {
            tracing::error!("Failed to link tag {}: {:?}", name, err);
            "Failed to update tags".to_string()
        })?;

        tags.push(tag);
    }

    tx.commit().await.map_err(|err| {
        tracing::error!("Failed to commit transaction: {:?}", err);
        "Failed to update tags".to_string()
    })?;

    Ok(tags)
}
