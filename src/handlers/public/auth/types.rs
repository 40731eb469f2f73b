use serde::{Deserialize, Serialize};

use crate::auth::password::MAX_PASSWORD_BYTES;
use crate::validation::{FieldRule, Schema};

/// Body of `POST /signup`
#[derive(Debug, Deserialize)]
pub struct SignupInput {
    pub username: String,
    pub password: String,
    pub name: Option<String>,
}

/// Body of `POST /signin`
#[derive(Debug, Deserialize)]
pub struct SigninInput {
    pub username: String,
    pub password: String,
}

/// Success body for both endpoints
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    pub token: String,
}

pub fn signup_schema() -> Schema {
    Schema::new(vec![
        FieldRule::required_string("username"),
        FieldRule::required_string("password").max_bytes(MAX_PASSWORD_BYTES),
        FieldRule::optional_string("name"),
    ])
}

pub fn signin_schema() -> Schema {
    Schema::new(vec![
        FieldRule::required_string("username"),
        FieldRule::required_string("password").max_bytes(MAX_PASSWORD_BYTES),
    ])
}
