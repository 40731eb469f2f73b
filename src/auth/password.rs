// Password hashing and verification

use bcrypt::{hash, verify};
use thiserror::Error;

/// Lowest cost bcrypt accepts. Only sensible for tests.
pub const MIN_COST: u32 = 4;

/// Highest cost bcrypt accepts.
pub const MAX_COST: u32 = 31;

/// bcrypt only looks at the first 72 bytes of its input.
pub const MAX_PASSWORD_BYTES: usize = 72;

#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("Password hashing failed: {0}")]
    Hashing(#[from] bcrypt::BcryptError),

    #[error("Hashing task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Salted bcrypt hashing with a fixed work factor.
///
/// Both operations run on the blocking thread pool so a slow hash never
/// stalls the async runtime.
#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher {
    cost: u32,
}

impl PasswordHasher {
    pub fn new(cost: u32) -> Self {
        Self {
            cost: cost.clamp(MIN_COST, MAX_COST),
        }
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }

    pub async fn hash(&self, password: &str) -> Result<String, PasswordError> {
        let password = password.to_owned();
        let cost = self.cost;

        Ok(tokio::task::spawn_blocking(move || hash(password, cost)).await??)
    }

    /// Constant-time comparison of `password` against a stored bcrypt hash.
    pub async fn verify(&self, password: &str, password_hash: &str) -> Result<bool, PasswordError> {
        let password = password.to_owned();
        let password_hash = password_hash.to_owned();

        Ok(tokio::task::spawn_blocking(move || verify(password, &password_hash)).await??)
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new(bcrypt::DEFAULT_COST)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn hash_is_salted_and_verifies() {
        let hasher = PasswordHasher::new(MIN_COST);

        let first = hasher.hash("pw1").await.unwrap();
        let second = hasher.hash("pw1").await.unwrap();

        assert_ne!(first, "pw1");
        assert_ne!(first, second);
        assert!(hasher.verify("pw1", &first).await.unwrap());
        assert!(hasher.verify("pw1", &second).await.unwrap());
        assert!(!hasher.verify("wrong", &first).await.unwrap());
    }

    #[tokio::test]
    async fn malformed_hash_is_an_error() {
        let hasher = PasswordHasher::new(MIN_COST);
        assert!(hasher.verify("pw1", "pw1").await.is_err());
    }

    #[test]
    fn cost_is_clamped_to_bcrypt_range() {
        assert_eq!(PasswordHasher::new(1).cost(), MIN_COST);
        assert_eq!(PasswordHasher::new(99).cost(), MAX_COST);
        assert_eq!(PasswordHasher::default().cost(), bcrypt::DEFAULT_COST);
    }
}
