use async_trait::async_trait;

use super::manager::DatabaseError;
use super::models::user::{NewUser, User};

/// Data access for the `users` relation.
///
/// Implementations must enforce username uniqueness themselves and report a
/// duplicate insert as [`DatabaseError::UniqueViolation`]; callers treat that
/// as the authoritative duplicate signal.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DatabaseError>;

    async fn create(&self, new_user: NewUser) -> Result<User, DatabaseError>;

    async fn ping(&self) -> Result<(), DatabaseError>;
}
