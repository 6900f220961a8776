use crate::models;
use crate::views;
use serde::Serialize;
use uuid::Uuid;

/// The signed in user's own page.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub role: models::Role,
    pub activated: bool,
    pub avatar: Option<String>,
    pub favorites: Vec<views::product::Card>,
    pub ratings: Vec<views::rating::User>,
}

impl Profile {
    pub fn new(
        user: &models::User,
        favorites: Vec<models::RatedProduct>,
        ratings: Vec<models::Rating>,
    ) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
            role: user.role,
            activated: user.is_activated(),
            avatar: user.avatar.clone(),
            favorites: favorites.into_iter().map(Into::into).collect(),
            ratings: ratings.into_iter().map(Into::into).collect(),
        }
    }
}
