use crate::models;
use serde::Serialize;
use uuid::Uuid;

/// Place detail page.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    pub id: Uuid,
    pub name: String,
    pub short: Option<String>,
    pub description: Option<String>,
    pub city: String,
    pub address: Option<String>,
    pub image: Option<String>,
    pub summary: models::RatingSummary,
    pub own_rating: Option<i16>,
}

impl Page {
    pub fn new(
        place: models::Place,
        summary: models::RatingSummary,
        own_rating: Option<&models::Rating>,
    ) -> Self {
        Self {
            id: place.id,
            name: place.name,
            short: place.short,
            description: place.description,
            city: place.city,
            address: place.address,
            image: place.image,
            summary,
            own_rating: own_rating.map(|rating| rating.value),
        }
    }
}
