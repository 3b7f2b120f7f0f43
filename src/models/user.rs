use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Public representation of a user. Never carries the password hash; this is
/// the shape injected into request extensions and returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Full user row as stored, including the bcrypt hash. Only the store and the
/// login path ever see this.
#[derive(Debug, Clone, FromRow)]
pub struct UserRecord {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<UserRecord> for User {
    fn from(record: UserRecord) -> User {
        User {
            id: record.id,
            name: record.name,
            email: record.email,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}
