use std::collections::HashSet;

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Longest token lifetime accepted: one hundred years.
pub const MAX_EXPIRY_HOURS: u64 = 24 * 365 * 100;

/// Claims embedded in a session token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub id: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,
}

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("Invalid JWT secret")]
    InvalidSecret,

    #[error("Invalid JWT expiry: {0} hours")]
    InvalidExpiry(u64),

    #[error("JWT generation error: {0}")]
    Generation(#[source] jsonwebtoken::errors::Error),

    #[error("Invalid JWT token: {0}")]
    Invalid(#[source] jsonwebtoken::errors::Error),
}

/// Signs and verifies HS256 session tokens with a shared secret.
#[derive(Clone)]
pub struct TokenSigner {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    expiry: Option<Duration>,
}

impl std::fmt::Debug for TokenSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenSigner")
            .field("expiry", &self.expiry)
            .finish_non_exhaustive()
    }
}

impl TokenSigner {
    pub fn new(secret: &str, expiry_hours: Option<u64>) -> Result<Self, TokenError> {
        if secret.is_empty() {
            return Err(TokenError::InvalidSecret);
        }

        let expiry = match expiry_hours {
            None => None,
            Some(hours) => Some(ttl(hours).ok_or(TokenError::InvalidExpiry(hours))?),
        };

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            expiry,
        })
    }

    pub fn expires(&self) -> bool {
        self.expiry.is_some()
    }

    pub fn sign(&self, user_id: Uuid) -> Result<String, TokenError> {
        let exp = match self.expiry {
            None => None,
            Some(ttl) => {
                let expires_at = Utc::now()
                    .checked_add_signed(ttl)
                    .ok_or(TokenError::InvalidExpiry(ttl.num_hours().unsigned_abs()))?;
                Some(expires_at.timestamp())
            }
        };
        let claims = Claims { id: user_id, exp };

        encode(&Header::default(), &claims, &self.encoding_key).map_err(TokenError::Generation)
    }

    /// Check the signature and, when present, the `exp` claim.
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.required_spec_claims = HashSet::new();

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(TokenError::Invalid)
    }
}

fn ttl(hours: u64) -> Option<Duration> {
    if hours == 0 || hours > MAX_EXPIRY_HOURS {
        return None;
    }
    Duration::try_hours(i64::try_from(hours).ok()?)
}
