use crate::models;
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: Uuid,
    pub user_id: Uuid,
    pub product_id: Uuid,
    pub text: String,
    pub media: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl From<models::Comment> for Comment {
    fn from(comment: models::Comment) -> Self {
        Self {
            id: comment.id,
            user_id: comment.user_id,
            product_id: comment.product_id,
            text: comment.text,
            media: comment.media,
            created_at: comment.created_at,
        }
    }
}
