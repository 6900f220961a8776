use crate::models;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::convert::From;
use uuid::Uuid;

/// A vote as shown to its owner.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub value: i16,
    pub target: Option<models::RatingTarget>,
    pub updated_at: DateTime<Utc>,
}

impl From<models::Rating> for User {
    fn from(rating: models::Rating) -> Self {
        Self {
            id: rating.id,
            value: rating.value,
            target: rating.target(),
            updated_at: rating.updated_at,
        }
    }
}
