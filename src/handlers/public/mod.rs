// handlers/public/mod.rs - Public handlers (no authentication required)
//
// These endpoints are the token acquisition surface, so every input is
// untrusted and validated before it reaches the store.

pub mod auth;

pub use auth::*;
