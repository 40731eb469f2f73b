// handlers/public/auth/signup.rs - POST /signup handler

use axum::{body::Bytes, extract::State, Json};

use super::types::{signup_schema, SignupInput, TokenResponse};
use super::utils::{parse_json_body, validate_input, USER_EXISTS_MESSAGE};
use crate::app::AppState;
use crate::database::NewUser;
use crate::error::ApiError;

/// POST /signup - Create an account and receive a JWT token
///
/// Expected Input:
/// ```json
/// {
///   "username": "string",   // Required, non-empty, unique
///   "password": "string",   // Required, non-empty, at most 72 bytes
///   "name": "string"        // Optional display name
/// }
/// ```
///
/// Expected Output (Success):
/// ```json
/// { "token": "eyJhbGciOiJIUzI1NiI..." }
/// ```
///
/// Errors: 400 invalid input, 409 username taken, 500 anything else.
pub async fn signup(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<TokenResponse>, ApiError> {
    let body = parse_json_body(&body, "signup")?;
    let input: SignupInput = validate_input(&signup_schema(), body, "signup")?;
    tracing::info!("Signup request for username: {}", input.username);

    // Fast path only; the store's unique constraint is what actually decides
    if state.store.find_by_username(&input.username).await?.is_some() {
        tracing::warn!("User already exists: {}", input.username);
        return Err(ApiError::conflict(USER_EXISTS_MESSAGE));
    }

    let password_hash = state.passwords.hash(&input.password).await?;

    let user = state
        .store
        .create(NewUser {
            username: input.username,
            password_hash,
            name: input.name,
        })
        .await?;

    let token = state.tokens.sign(user.id)?;
    tracing::info!("User created: {} ({})", user.username, user.id);

    Ok(Json(TokenResponse { token }))
}
