//! HTTP server.
//!
//! Builds the axum router around shared [`AppState`] and serves it with
//! CORS for the configured frontend origins and request tracing.

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderMap, HeaderValue, Method};
use axum::response::Json;
use axum::routing::{get, post};
use axum::Router;
use reqwest::Url;
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::domain::models::{Config, Session};
use crate::domain::ports::IdentityProvider;
use crate::services::{SessionStore, TrackerService};

use super::session::CookieSettings;
use super::{auth, issues};

/// Configuration for the HTTP server.
#[derive(Debug, Clone)]
pub struct HttpServerConfig {
    /// Host to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Origins allowed to make credentialed cross-origin requests.
    pub allowed_origins: Vec<String>,
}

impl Default for HttpServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
            allowed_origins: vec!["http://localhost:5173".to_string()],
        }
    }
}

impl HttpServerConfig {
    pub fn from_config(config: &Config) -> Self {
        let mut allowed_origins = vec![config.server.frontend_url.clone()];
        allowed_origins.extend(config.server.cors_origins.iter().cloned());
        Self {
            host: config.server.host.clone(),
            port: config.server.port,
            allowed_origins,
        }
    }
}

/// Shared state for the HTTP handlers.
pub struct AppState {
    pub tracker: Arc<TrackerService>,
    pub identity: Arc<dyn IdentityProvider>,
    pub sessions: SessionStore,
    pub cookie: CookieSettings,
    /// Repository every issue request targets.
    pub owner: String,
    pub repo: String,
    /// Where the OAuth callback sends the browser afterwards.
    pub frontend_url: String,
}

impl AppState {
    /// Resolve the request's session cookie to a live session.
    pub async fn current_session(&self, headers: &HeaderMap) -> Option<super::CurrentSession> {
        let id = self.cookie.session_id(headers)?;
        let session: Arc<Session> = self.sessions.get(&id).await?;
        Some(super::CurrentSession { id, session })
    }
}

/// Tracker proxy HTTP server.
pub struct TrackerHttpServer {
    config: HttpServerConfig,
    state: Arc<AppState>,
}

impl TrackerHttpServer {
    pub fn new(state: AppState, config: HttpServerConfig) -> Self {
        Self {
            config,
            state: Arc::new(state),
        }
    }

    /// Build the router.
    pub fn build_router(&self) -> Router {
        let app = Router::new()
            .route("/", get(root))
            .route("/auth/callback", get(auth::callback))
            .route("/auth/status", get(auth::status))
            .route("/auth/logout", post(auth::logout))
            .route("/issues", get(issues::list_issues).post(issues::create_issue))
            .with_state(Arc::clone(&self.state));

        app.layer(cors_layer(&self.config.allowed_origins))
            .layer(TraceLayer::new_for_http())
    }

    /// Start the server.
    pub async fn serve(self) -> Result<()> {
        self.serve_with_shutdown(std::future::pending()).await
    }

    /// Bind the listen socket. `host` may be an IP literal or a hostname.
    pub async fn bind(&self) -> Result<TcpListener> {
        let host = self
            .config
            .host
            .trim_start_matches('[')
            .trim_end_matches(']');
        TcpListener::bind((host, self.config.port))
            .await
            .with_context(|| format!("Failed to bind {}:{}", self.config.host, self.config.port))
    }

    /// Start the server with a shutdown signal.
    pub async fn serve_with_shutdown<F>(self, shutdown: F) -> Result<()>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let listener = self.bind().await?;
        let addr = listener.local_addr().context("Listener has no local address")?;
        let router = self.build_router();

        tracing::info!(%addr, owner = %self.state.owner, repo = %self.state.repo, "tracker proxy listening");

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown)
            .await
            .context("HTTP server error")?;
        Ok(())
    }
}

/// CORS for credentialed requests from the given origins.
///
/// Origins are reduced to `scheme://host[:port]`; unparsable entries are skipped.
fn cors_layer(origins: &[String]) -> CorsLayer {
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| Url::parse(origin).ok())
        .filter_map(|url| HeaderValue::from_str(&url.origin().ascii_serialization()).ok())
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
}

async fn root() -> Json<Value> {
    Json(json!({ "message": "Hello, Github Issue Tracker!" }))
}
