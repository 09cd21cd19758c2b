//! In-process user store
//!
//! Keeps users in a vector behind a `RwLock`, with the same uniqueness
//! rules as the `users` table. Used by tests and for running the service
//! without a database.

use super::user::{CreateUserError, NewUser, UserRecord, UserStore};
use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

#[derive(Default)]
pub struct InMemoryUserStore {
    users: RwLock<Vec<UserRecord>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored users
    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn find_by_username_or_email(
        &self,
        username: &str,
        email: &str,
    ) -> Result<Option<UserRecord>, sqlx::Error> {
        let users = self.users.read().await;
        Ok(users
            .iter()
            .find(|u| u.username == username || u.email == email)
            .cloned())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<UserRecord>, sqlx::Error> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.id == id).cloned())
    }

    async fn insert(&self, user: NewUser) -> Result<UserRecord, CreateUserError> {
        // Check and push under one write lock, like a unique index would
        let mut users = self.users.write().await;
        if users
            .iter()
            .any(|u| u.username == user.username || u.email == user.email)
        {
            return Err(CreateUserError::Duplicate);
        }

        let record = UserRecord {
            id: users.len() as i64 + 1,
            username: user.username,
            email: user.email,
            password_hash: user.password_hash,
            created_at: Utc::now(),
        };
        users.push(record.clone());
        Ok(record)
    }

    async fn health_check(&self) -> anyhow::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_user(username: &str, email: &str) -> NewUser {
        NewUser {
            username: username.to_string(),
            email: email.to_string(),
            password_hash: "$argon2id$placeholder".to_string(),
        }
    }

    #[tokio::test]
    async fn test_insert_assigns_sequential_ids() {
        let store = InMemoryUserStore::new();
        let first = store.insert(new_user("alice", "a@x.com")).await.unwrap();
        let second = store.insert(new_user("bob", "b@x.com")).await.unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(store.len().await, 2);
    }

    #[tokio::test]
    async fn test_duplicate_username_rejected() {
        let store = InMemoryUserStore::new();
        store.insert(new_user("alice", "a@x.com")).await.unwrap();

        let result = store.insert(new_user("alice", "other@x.com")).await;
        assert!(matches!(result, Err(CreateUserError::Duplicate)));
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let store = InMemoryUserStore::new();
        store.insert(new_user("alice", "a@x.com")).await.unwrap();

        let result = store.insert(new_user("bob", "a@x.com")).await;
        assert!(matches!(result, Err(CreateUserError::Duplicate)));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_find_by_username_or_email() {
        let store = InMemoryUserStore::new();
        store.insert(new_user("alice", "a@x.com")).await.unwrap();

        let by_name = store.find_by_username_or_email("alice", "alice").await.unwrap();
        let by_email = store.find_by_username_or_email("a@x.com", "a@x.com").await.unwrap();
        let missing = store.find_by_username_or_email("carol", "c@x.com").await.unwrap();

        assert_eq!(by_name.map(|u| u.id), Some(1));
        assert_eq!(by_email.map(|u| u.id), Some(1));
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_find_by_id() {
        let store = InMemoryUserStore::new();
        assert!(store.is_empty().await);
        let created = store.insert(new_user("alice", "a@x.com")).await.unwrap();

        let found = store.find_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(found.username, "alice");
        assert!(store.find_by_id(99).await.unwrap().is_none());
    }
}
