use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Comment {
    pub id: Uuid,
    pub user_id: Uuid,
    pub product_id: Uuid,
    pub text: String,
    pub media: Vec<String>, // storage keys inside the media namespace
    pub created_at: DateTime<Utc>,
}
