use axum::body::Bytes;
use serde::de::DeserializeOwned;
use serde_json::Value;

pub use crate::error::USER_EXISTS_MESSAGE;
use crate::error::ApiError;
use crate::validation::Schema;

pub const INVALID_INPUT_MESSAGE: &str = "Inputs not correct";
pub const BAD_CREDENTIALS_MESSAGE: &str = "Incorrect credentials";

/// Parse a raw request body as JSON.
///
/// A body that is not JSON at all is treated as an internal failure, not a
/// validation error: the cause is logged and the caller sees a generic 500.
pub fn parse_json_body(body: &Bytes, operation: &str) -> Result<Value, ApiError> {
    serde_json::from_slice(body).map_err(|e| {
        tracing::error!("Error during {} process: unreadable JSON body: {}", operation, e);
        ApiError::internal()
    })
}

/// Check `body` against `schema` and deserialize it into the typed input.
pub fn validate_input<T: DeserializeOwned>(
    schema: &Schema,
    body: Value,
    operation: &str,
) -> Result<T, ApiError> {
    schema.parse(body).map_err(|field_errors| {
        tracing::warn!("{} input validation failed: {:?}", operation, field_errors);
        ApiError::validation_error(INVALID_INPUT_MESSAGE, Some(field_errors))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::public::auth::types::{signup_schema, SignupInput};
    use axum::http::StatusCode;
    use serde_json::json;

    #[test]
    fn malformed_json_is_internal() {
        let err = parse_json_body(&Bytes::from_static(b"{username"), "signup").unwrap_err();
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn empty_body_is_internal() {
        let err = parse_json_body(&Bytes::new(), "signin").unwrap_err();
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn schema_failure_is_bad_request_with_fields() {
        let err = validate_input::<SignupInput>(
            &signup_schema(),
            json!({"username": "", "password": "pw1"}),
            "signup",
        )
        .unwrap_err();

        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        let body = err.to_json();
        assert_eq!(body["message"], INVALID_INPUT_MESSAGE);
        assert!(body["errors"].get("username").is_some());
        assert!(body["errors"].get("password").is_none());
    }

    #[test]
    fn oversized_password_is_rejected() {
        let long = "x".repeat(73);
        let err = validate_input::<SignupInput>(
            &signup_schema(),
            json!({"username": "alice", "password": long}),
            "signup",
        )
        .unwrap_err();
        assert!(err.to_json()["errors"].get("password").is_some());
    }
}
