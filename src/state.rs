use crate::auth::{
    password::{Argon2Hasher, PasswordHasher},
    repo::{PgUserStore, UserStore},
    services::AuthService,
};
use crate::config::AppConfig;
use anyhow::Context;
use sqlx::{postgres::PgPoolOptions, PgPool};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub auth: AuthService,
}

impl AppState {
    pub fn from_pool(db: PgPool) -> Self {
        Self::from_parts(Arc::new(PgUserStore::new(db)), Arc::new(Argon2Hasher))
    }

    pub fn from_parts(store: Arc<dyn UserStore>, hasher: Arc<dyn PasswordHasher>) -> Self {
        Self {
            auth: AuthService::new(store, hasher),
        }
    }

    #[cfg(test)]
    pub fn fake() -> Self {
        use crate::auth::memory::InMemoryUserStore;

        Self::from_parts(Arc::new(InMemoryUserStore::new()), Arc::new(Argon2Hasher))
    }
}

pub async fn connect_db(config: &AppConfig) -> anyhow::Result<PgPool> {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.database_url)
        .await
        .context("connect to database")
}
