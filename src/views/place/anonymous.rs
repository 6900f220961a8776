use crate::models;
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: Uuid,
    pub name: String,
    pub short: Option<String>,
    pub city: String,
    pub image: Option<String>,
    pub summary: models::RatingSummary,
}

impl From<models::RatedPlace> for Card {
    fn from(rated: models::RatedPlace) -> Self {
        let place = rated.place;
        Self {
            id: place.id,
            name: place.name,
            short: place.short,
            city: place.city,
            image: place.image,
            summary: rated.summary,
        }
    }
}
