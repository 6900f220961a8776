use chrono::{DateTime, Utc};
use std::fmt;
use uuid::Uuid;

#[derive(Clone, sqlx::FromRow)]
pub struct Session {
    pub id: String, // opaque token stored in the session cookie
    pub user_id: Uuid,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("user_id", &self.user_id)
            .field("expires_at", &self.expires_at)
            .finish_non_exhaustive()
    }
}
