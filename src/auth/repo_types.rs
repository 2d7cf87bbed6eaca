use serde::Serialize;
use sqlx::FromRow;
use time::OffsetDateTime;

/// User record in the database.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct User {
    pub id: i64,                      // assigned by the store
    pub name: Option<String>,         // display name, free text
    pub email: String,                // unique lookup key
    #[serde(skip_serializing)]
    pub password_hash: String,        // Argon2 PHC string, not exposed in JSON
    pub created_at: OffsetDateTime,   // creation timestamp
}

/// Insert payload for a new user. Carries only the hash, never the plaintext.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: Option<String>,
    pub email: String,
    pub password_hash: String,
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("a user with email {email} already exists")]
    DuplicateKey { email: String },
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}
