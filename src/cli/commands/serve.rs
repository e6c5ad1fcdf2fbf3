//! `serve`: wire the adapters together and run the HTTP server.

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use crate::adapters::github::{GitHubClient, GitHubOAuth};
use crate::adapters::http::{AppState, CookieSettings, HttpServerConfig, TrackerHttpServer};
use crate::domain::models::Config;
use crate::infrastructure::config::ConfigLoader;
use crate::infrastructure::logging::Logger;
use crate::services::{IssueCache, SessionStore, TrackerService};

/// Build the handler state from configuration.
pub fn build_state(config: &Config) -> Result<AppState> {
    let host = GitHubClient::new(&config.github).context("Failed to create GitHub client")?;
    let identity = GitHubOAuth::new(&config.github).context("Failed to create OAuth client")?;

    let tracker = TrackerService::new(Arc::new(host), Arc::new(IssueCache::new()));
    let sessions = SessionStore::new(&config.session);
    let cookie = CookieSettings::new(&config.session, sessions.ttl(), config.server.cookie_secure);

    Ok(AppState {
        tracker: Arc::new(tracker),
        identity: Arc::new(identity),
        sessions,
        cookie,
        owner: config.github.owner.clone(),
        repo: config.github.repo.clone(),
        frontend_url: config.server.frontend_url.clone(),
    })
}

pub async fn execute(mut config: Config, host: Option<String>, port: Option<u16>) -> Result<()> {
    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        config.server.port = port;
    }
    ConfigLoader::validate(&config)?;

    let _logger = Logger::init(&config.logging)?;

    let state = build_state(&config)?;
    let server = TrackerHttpServer::new(state, HttpServerConfig::from_config(&config));

    server.serve_with_shutdown(shutdown_signal()).await?;
    info!("tracker proxy stopped");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("shutdown signal received");
    }
}
