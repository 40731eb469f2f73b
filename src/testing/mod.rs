use std::sync::Arc;

use axum::body::Bytes;
use serde_json::Value;

use crate::app::AppState;
use crate::auth::password::MIN_COST;
use crate::config::SecurityConfig;
use crate::database::MemoryUserStore;

pub const TEST_SECRET: &str = "test-secret";

/// Security settings with the cheapest bcrypt cost so tests stay fast
pub fn test_security() -> SecurityConfig {
    SecurityConfig {
        jwt_secret: TEST_SECRET.to_string(),
        jwt_expiry_hours: None,
        bcrypt_cost: MIN_COST,
    }
}

/// Handler state over a fresh in-memory store; the store handle is returned
/// too so tests can inspect rows or simulate an outage.
pub fn test_state() -> (AppState, Arc<MemoryUserStore>) {
    let store = Arc::new(MemoryUserStore::new());
    let state = AppState::new(store.clone(), &test_security()).expect("test secret is non-empty");
    (state, store)
}

pub fn body(value: Value) -> Bytes {
    Bytes::from(value.to_string())
}
