use std::sync::Arc;

use axum::{
    extract::{DefaultBodyLimit, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::auth::{PasswordHasher, TokenError, TokenSigner};
use crate::config::{ApiConfig, SecurityConfig};
use crate::database::UserStore;
use crate::handlers::public::auth;

/// Everything a handler needs, built once at startup and cloned per request.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn UserStore>,
    pub tokens: TokenSigner,
    pub passwords: PasswordHasher,
}

impl AppState {
    pub fn new(store: Arc<dyn UserStore>, security: &SecurityConfig) -> Result<Self, TokenError> {
        Ok(Self {
            store,
            tokens: TokenSigner::new(&security.jwt_secret, security.jwt_expiry_hours)?,
            passwords: PasswordHasher::new(security.bcrypt_cost),
        })
    }
}

pub fn app(state: AppState, api: &ApiConfig) -> Router {
    let router = Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        // Auth routes, also mounted under the blog's versioned prefix
        .merge(user_routes())
        .nest("/api/v1/user", user_routes())
        .layer(DefaultBodyLimit::max(api.max_request_size_bytes))
        .layer(TraceLayer::new_for_http());

    let router = if api.enable_cors {
        router.layer(CorsLayer::permissive())
    } else {
        router
    };

    router.with_state(state)
}

fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/signup", post(auth::signup))
        .route("/signin", post(auth::signin))
}

async fn root() -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Json(json!({
        "name": "Medium API (Rust)",
        "version": version,
        "endpoints": {
            "signup": "POST /signup, POST /api/v1/user/signup",
            "signin": "POST /signin, POST /api/v1/user/signin",
            "health": "GET /health",
        }
    }))
}

async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    match state.store.ping().await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({
                "status": "ok",
                "timestamp": now,
                "database": "ok"
            })),
        ),
        Err(e) => {
            tracing::error!("Health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "status": "degraded",
                    "timestamp": now,
                    "database": "unavailable"
                })),
            )
        }
    }
}
