#![allow(dead_code)]

use std::sync::{Arc, Once};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;

use medium_api_rust::auth::TokenSigner;
use medium_api_rust::config::{ApiConfig, SecurityConfig};
use medium_api_rust::database::MemoryUserStore;
use medium_api_rust::{app, AppState};

pub const TEST_SECRET: &str = "integration-secret";

static TRACING: Once = Once::new();

/// Route test logs through the libtest capture; RUST_LOG still applies.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

pub struct TestApp {
    pub router: Router,
    pub store: Arc<MemoryUserStore>,
    pub tokens: TokenSigner,
}

impl TestApp {
    pub fn new() -> Self {
        init_tracing();

        let store = Arc::new(MemoryUserStore::new());
        let security = SecurityConfig {
            jwt_secret: TEST_SECRET.to_string(),
            jwt_expiry_hours: None,
            bcrypt_cost: 4,
        };
        let state = AppState::new(store.clone(), &security).expect("valid secret");
        let router = app(state, &ApiConfig::default());
        let tokens = TokenSigner::new(TEST_SECRET, None).expect("valid secret");

        Self { router, store, tokens }
    }

    /// POST a raw body and return status plus the response body.
    pub async fn post_raw(&self, path: &str, body: impl Into<Body>) -> Result<(StatusCode, Value)> {
        let request = Request::builder()
            .method("POST")
            .uri(path)
            .header("content-type", "application/json")
            .body(body.into())?;
        send(self.router.clone(), request).await
    }

    pub async fn post(&self, path: &str, body: &Value) -> Result<(StatusCode, Value)> {
        self.post_raw(path, body.to_string()).await
    }

    pub async fn get(&self, path: &str) -> Result<(StatusCode, Value)> {
        let request = Request::builder().uri(path).body(Body::empty())?;
        send(self.router.clone(), request).await
    }

    /// Decode a token and return the user id it names.
    pub fn token_user(&self, body: &Value) -> Result<uuid::Uuid> {
        let token = body["token"].as_str().context("response has no token")?;
        Ok(self.tokens.verify(token)?.id)
    }
}

async fn send(router: Router, request: Request<Body>) -> Result<(StatusCode, Value)> {
    let response = router.oneshot(request).await?;
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
    // Framework rejections (e.g. 413) answer in plain text
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
    };
    Ok((status, body))
}

/// The same app served over a real socket, for client-level tests.
pub struct TestServer {
    pub port: u16,
    pub base_url: String,
    pub app: TestApp,
}

impl TestServer {
    pub async fn spawn() -> Result<Self> {
        let app = TestApp::new();

        // Pick an unused port for isolation
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);

        let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
            .await
            .context("failed to bind test port")?;
        let router = app.router.clone();
        tokio::spawn(async move {
            let _ = axum::serve(listener, router).await;
        });

        let server = Self { port, base_url, app };
        server.wait_ready(Duration::from_secs(10)).await?;
        Ok(server)
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let client = reqwest::Client::new();
        let deadline = Instant::now() + timeout;
        let url = format!("{}/health", self.base_url);
        while Instant::now() < deadline {
            if let Ok(resp) = client.get(&url).send().await {
                if resp.status() == reqwest::StatusCode::OK {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        anyhow::bail!("server did not become ready on {} within {:?}", self.base_url, timeout)
    }
}
