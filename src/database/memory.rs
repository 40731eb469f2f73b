use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::manager::DatabaseError;
use super::models::user::{NewUser, User};
use super::store::UserStore;

/// In-process `UserStore` keyed by username.
///
/// The uniqueness check and the insert happen under one write lock, so
/// concurrent signups for the same name cannot both succeed.
#[derive(Debug, Default)]
pub struct MemoryUserStore {
    users: RwLock<HashMap<String, User>>,
    unavailable: AtomicBool,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every call fail as if the database were down.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }

    fn check_available(&self) -> Result<(), DatabaseError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(DatabaseError::QueryError("store unavailable".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DatabaseError> {
        self.check_available()?;
        Ok(self.users.read().await.get(username).cloned())
    }

    async fn create(&self, new_user: NewUser) -> Result<User, DatabaseError> {
        self.check_available()?;

        let mut users = self.users.write().await;
        if users.contains_key(&new_user.username) {
            return Err(DatabaseError::UniqueViolation("users_username_key".to_string()));
        }

        let user = User {
            id: Uuid::new_v4(),
            username: new_user.username,
            password_hash: new_user.password_hash,
            name: new_user.name,
            created_at: Utc::now(),
        };
        users.insert(user.username.clone(), user.clone());
        Ok(user)
    }

    async fn ping(&self) -> Result<(), DatabaseError> {
        self.check_available()
    }
}
