// handlers/public/auth/signin.rs - POST /signin handler

use axum::{body::Bytes, extract::State, Json};

use super::types::{signin_schema, SigninInput, TokenResponse};
use super::utils::{parse_json_body, validate_input, BAD_CREDENTIALS_MESSAGE};
use crate::app::AppState;
use crate::error::ApiError;

/// POST /signin - Exchange credentials for a JWT token
///
/// Expected Input:
/// ```json
/// {
///   "username": "string",   // Required
///   "password": "string"    // Required
/// }
/// ```
///
/// Unknown usernames and wrong passwords get the same 403 so the response
/// does not reveal which accounts exist.
pub async fn signin(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<TokenResponse>, ApiError> {
    let body = parse_json_body(&body, "signin")?;
    let input: SigninInput = validate_input(&signin_schema(), body, "signin")?;
    tracing::info!("Signin request for username: {}", input.username);

    let Some(user) = state.store.find_by_username(&input.username).await? else {
        tracing::warn!("Incorrect credentials: unknown user {}", input.username);
        return Err(ApiError::forbidden(BAD_CREDENTIALS_MESSAGE));
    };

    if !state
        .passwords
        .verify(&input.password, &user.password_hash)
        .await?
    {
        tracing::warn!("Incorrect credentials: wrong password for {}", input.username);
        return Err(ApiError::forbidden(BAD_CREDENTIALS_MESSAGE));
    }

    let token = state.tokens.sign(user.id)?;
    tracing::info!("User signed in: {} ({})", user.username, user.id);

    Ok(Json(TokenResponse { token }))
}
