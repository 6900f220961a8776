use crate::models;
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Admin {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub role: models::Role,
    pub activated_at: Option<DateTime<Utc>>,
    pub avatar: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<models::User> for Admin {
    fn from(user: models::User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            role: user.role,
            activated_at: user.activated_at,
            avatar: user.avatar,
            created_at: user.created_at,
        }
    }
}
