use async_trait::async_trait;
use sqlx::PgPool;

pub use crate::auth::repo_types::{NewUser, StoreError, User};

/// Persistence boundary for user records.
///
/// `find_by_email` distinguishes three outcomes: `Ok(Some(_))` when the user
/// exists, `Ok(None)` when it does not, and `Err(_)` when the store itself
/// failed.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Insert a new user. Fails with [`StoreError::DuplicateKey`] when the
    /// email is already taken.
    async fn create_user(&self, new_user: NewUser) -> Result<User, StoreError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;
}

/// Postgres-backed [`UserStore`].
#[derive(Clone)]
pub struct PgUserStore {
    db: PgPool,
}

impl PgUserStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn create_user(&self, new_user: NewUser) -> Result<User, StoreError> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (name, email, password_hash)
            VALUES ($1, $2, $3)
            RETURNING id, name, email, password_hash, created_at
            "#,
        )
        .bind(&new_user.name)
        .bind(&new_user.email)
        .bind(&new_user.password_hash)
        .fetch_one(&self.db)
        .await
        .map_err(|e| classify_insert_error(e, &new_user.email))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, password_hash, created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.db)
        .await?;
        Ok(user)
    }
}

fn classify_insert_error(err: sqlx::Error, email: &str) -> StoreError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_unique_violation() {
            return StoreError::DuplicateKey {
                email: email.to_string(),
            };
        }
    }
    StoreError::Database(err)
}
