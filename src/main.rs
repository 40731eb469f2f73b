use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use medium_api_rust::config::AppConfig;
use medium_api_rust::database::{DatabaseManager, PgUserStore};
use medium_api_rust::{app, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL and JWT_SECRET
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("medium_api_rust=info,tower_http=info")),
        )
        .init();

    let config = AppConfig::from_env().context("invalid configuration")?;
    tracing::info!("Starting Medium API in {:?} mode", config.environment);

    let pool = DatabaseManager::connect(&config.database)
        .await
        .context("failed to connect to database")?;
    DatabaseManager::migrate(&pool)
        .await
        .context("failed to apply migrations")?;

    let state = AppState::new(Arc::new(PgUserStore::new(pool)), &config.security)?;
    if !state.tokens.expires() {
        tracing::warn!("JWT_EXPIRY_HOURS is unset: issued tokens never expire and cannot be revoked");
    }

    let app = app(state, &config.api);

    let bind_addr = format!("0.0.0.0:{}", config.api.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("Medium API listening on http://{}", bind_addr);

    axum::serve(listener, app).await?;
    Ok(())
}
