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
    pub city: String,
    pub address: Option<String>,
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<models::Place> for Admin {
    fn from(place: models::Place) -> Self {
        Self {
            id: place.id,
            name: place.name,
            short: place.short,
            description: place.description,
            city: place.city,
            address: place.address,
            image: place.image,
            created_at: place.created_at,
            updated_at: place.updated_at,
        }
    }
}
