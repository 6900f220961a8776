use crate::models::Role;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use uuid::Uuid;

#[derive(Clone, Serialize, sqlx::FromRow)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    #[sqlx(try_from = "String")]
    pub role: Role,
    pub activated_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing)]
    pub activate_code: Option<String>,
    pub avatar: Option<String>, // storage key inside the avatars namespace
    pub created_at: DateTime<Utc>,
}

// the password hash and the activation code never reach the logs
impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("role", &self.role)
            .field("activated_at", &self.activated_at)
            .finish_non_exhaustive()
    }
}

impl User {
    pub fn is_activated(&self) -> bool {
        self.activated_at.is_some()
    }
}

#[cfg(test)]
impl User {
    pub fn fixture(role: Role) -> Self {
        User {
            id: Uuid::new_v4(),
            username: format!("{}-{}", role, &Uuid::new_v4().simple().to_string()[..8]),
            email: "fixture@example.com".to_string(),
            password_hash: String::new(),
            role,
            activated_at: None,
            activate_code: None,
            avatar: None,
            created_at: Utc::now(),
        }
    }
}
