use serde::{Deserialize, Serialize};
use std::env;
use thiserror::Error;

use crate::auth::password::{MAX_COST, MIN_COST};
use crate::auth::token::MAX_EXPIRY_HOURS;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("Missing configuration: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub database: DatabaseConfig,
    pub api: ApiConfig,
    pub security: SecurityConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub connection_timeout: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub port: u16,
    pub max_request_size_bytes: usize,
    pub enable_cors: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    #[serde(skip_serializing)]
    pub jwt_secret: String,
    /// Tokens carry no `exp` claim when unset.
    pub jwt_expiry_hours: Option<u64>,
    pub bcrypt_cost: u32,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            max_request_size_bytes: 1024 * 1024,
            enable_cors: true,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the config from an arbitrary key lookup, so tests never touch process env.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = match lookup("APP_ENV").as_deref() {
            Some("production") | Some("prod") => Environment::Production,
            Some("staging") | Some("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        let database_url = lookup("DATABASE_URL")
            .filter(|v| !v.is_empty())
            .ok_or(ConfigError::Missing("DATABASE_URL"))?;
        let jwt_secret = lookup("JWT_SECRET")
            .filter(|v| !v.is_empty())
            .ok_or(ConfigError::Missing("JWT_SECRET"))?;

        let mut config = Self::preset(environment, database_url, jwt_secret);
        config.apply_overrides(&lookup)?;
        Ok(config)
    }

    fn apply_overrides<F>(&mut self, lookup: &F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Database overrides
        if let Some(v) = parse(lookup, "DATABASE_MAX_CONNECTIONS")? {
            self.database.max_connections = v;
        }
        if let Some(v) = parse(lookup, "DATABASE_CONNECTION_TIMEOUT")? {
            self.database.connection_timeout = v;
        }

        // API overrides; MEDIUM_API_PORT wins over the generic PORT
        if let Some(v) = parse(lookup, "PORT")? {
            self.api.port = v;
        }
        if let Some(v) = parse(lookup, "MEDIUM_API_PORT")? {
            self.api.port = v;
        }
        if let Some(v) = parse(lookup, "API_MAX_REQUEST_SIZE_BYTES")? {
            self.api.max_request_size_bytes = v;
        }
        if let Some(v) = parse(lookup, "SECURITY_ENABLE_CORS")? {
            self.api.enable_cors = v;
        }

        // Security overrides
        if let Some(v) = parse::<u64, F>(lookup, "JWT_EXPIRY_HOURS")? {
            if !(1..=MAX_EXPIRY_HOURS).contains(&v) {
                return Err(ConfigError::Invalid {
                    key: "JWT_EXPIRY_HOURS",
                    value: v.to_string(),
                });
            }
            self.security.jwt_expiry_hours = Some(v);
        }
        if let Some(v) = parse::<u32, F>(lookup, "BCRYPT_COST")? {
            if !(MIN_COST..=MAX_COST).contains(&v) {
                return Err(ConfigError::Invalid {
                    key: "BCRYPT_COST",
                    value: v.to_string(),
                });
            }
            self.security.bcrypt_cost = v;
        }

        Ok(())
    }

    fn preset(environment: Environment, database_url: String, jwt_secret: String) -> Self {
        let (max_connections, connection_timeout, bcrypt_cost) = match environment {
            Environment::Development => (10, 30, 10),
            Environment::Staging => (20, 10, bcrypt::DEFAULT_COST),
            Environment::Production => (50, 5, bcrypt::DEFAULT_COST),
        };

        Self {
            environment,
            database: DatabaseConfig {
                url: database_url,
                max_connections,
                connection_timeout,
            },
            api: ApiConfig {
                enable_cors: environment != Environment::Production,
                ..ApiConfig::default()
            },
            security: SecurityConfig {
                jwt_secret,
                jwt_expiry_hours: None,
                bcrypt_cost,
            },
        }
    }
}

fn parse<T, F>(lookup: &F, key: &'static str) -> Result<Option<T>, ConfigError>
where
    T: std::str::FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::Invalid { key, value: raw }),
    }
}
