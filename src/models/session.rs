use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// A server-side session row, keyed by the signed token itself.
///
/// Sessions are created at registration and login, read on every authenticated
/// request, and deleted at logout. Expired rows are not swept; resolution simply
/// treats them as absent.
#[derive(Debug, Clone, FromRow)]
pub struct Session {
    /// The signed token string. Primary key.
    pub id: String,
    pub user_id: i32,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl Session {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}
