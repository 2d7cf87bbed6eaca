//! In-memory [`UserStore`] used by the test suites.

use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use time::OffsetDateTime;
use tokio::sync::RwLock;

use crate::auth::repo::{NewUser, StoreError, User, UserStore};

#[derive(Debug, Default)]
pub struct InMemoryUserStore {
    users: RwLock<HashMap<String, User>>,
    next_id: AtomicI64,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn create_user(&self, new_user: NewUser) -> Result<User, StoreError> {
        let mut users = self.users.write().await;
        if users.contains_key(&new_user.email) {
            return Err(StoreError::DuplicateKey {
                email: new_user.email,
            });
        }

        let user = User {
            id: self.next_id.fetch_add(1, Ordering::SeqCst) + 1,
            name: new_user.name,
            email: new_user.email,
            password_hash: new_user.password_hash,
            created_at: OffsetDateTime::now_utc(),
        };
        users.insert(user.email.clone(), user.clone());
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        Ok(self.users.read().await.get(email).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_user(email: &str) -> NewUser {
        NewUser {
            name: None,
            email: email.to_string(),
            password_hash: "hash".to_string(),
        }
    }

    #[tokio::test]
    async fn create_assigns_increasing_ids() {
        let store = InMemoryUserStore::new();
        let first = store.create_user(new_user("a@example.com")).await.unwrap();
        let second = store.create_user(new_user("b@example.com")).await.unwrap();
        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
    }

    #[tokio::test]
    async fn find_by_email_reports_missing_as_none() {
        let store = InMemoryUserStore::new();
        store.create_user(new_user("a@example.com")).await.unwrap();

        assert!(store.find_by_email("a@example.com").await.unwrap().is_some());
        assert!(store.find_by_email("nobody@example.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn duplicate_email_is_rejected() {
        let store = InMemoryUserStore::new();
        store.create_user(new_user("a@example.com")).await.unwrap();

        let err = store.create_user(new_user("a@example.com")).await.unwrap_err();
        assert!(matches!(err, StoreError::DuplicateKey { ref email } if email == "a@example.com"));
        assert_eq!(store.len().await, 1);
    }
}
