use crate::models;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::convert::From;
use uuid::Uuid;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Admin {
    pub id: Uuid,
    pub user_id: Uuid,
    pub value: i16,
    pub product_id: Option<Uuid>,
    pub place_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<models::Rating> for Admin {
    fn from(rating: models::Rating) -> Self {
        Self {
            id: rating.id,
            user_id: rating.user_id,
            value: rating.value,
            product_id: rating.product_id,
            place_id: rating.place_id,
            created_at: rating.created_at,
            updated_at: rating.updated_at,
        }
    }
}
