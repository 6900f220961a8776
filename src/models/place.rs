use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Place {
    pub id: Uuid,
    pub name: String,
    pub short: Option<String>,
    pub description: Option<String>,
    pub city: String,
    pub address: Option<String>,
    pub image: Option<String>, // storage key inside the places namespace
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
