use crate::models;
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Admin {
    pub id: Uuid,
    pub name: String,
    pub short: Option<String>,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub product_type: models::ProductType,
    pub active: bool,
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<models::Product> for Admin {
    fn from(product: models::Product) -> Self {
        Self {
            id: product.id,
            name: product.name,
            short: product.short,
            description: product.description,
            product_type: product.product_type,
            active: product.active,
            image: product.image,
            created_at: product.created_at,
            updated_at: product.updated_at,
        }
    }
}
