// handlers/mod.rs - HTTP handlers grouped by access tier
//
// Only the public tier exists: signup and signin are how a client obtains a token.
pub mod public;

pub use public::*;
