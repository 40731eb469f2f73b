// handlers/public/auth/mod.rs - Public authentication handlers
//
// POST /signup creates an account and returns a token.
// POST /signin exchanges a username and password for a token.

pub mod signin;
pub mod signup;
pub mod types;
pub mod utils;

pub use signin::signin;
pub use signup::signup;
pub use types::{SigninInput, SignupInput, TokenResponse};
