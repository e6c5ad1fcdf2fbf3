//! GitHub OAuth web flow: code exchange and user lookup.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{info, instrument, warn};

use crate::domain::errors::{TrackerError, TrackerResult};
use crate::domain::models::{AccessToken, GitHubConfig, SessionUser};
use crate::domain::ports::IdentityProvider;

use super::error::translate_transport;

/// Response of `POST /login/oauth/access_token` with `Accept: application/json`.
///
/// GitHub answers 200 even for a rejected code; the failure is in `error`.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
    error: Option<String>,
    error_description: Option<String>,
}

/// `GET /user` response.
#[derive(Debug, Deserialize)]
struct UserResponse {
    login: String,
    name: Option<String>,
    #[serde(default)]
    avatar_url: String,
    id: u64,
}

/// OAuth client for a single registered GitHub OAuth app.
#[derive(Clone)]
pub struct GitHubOAuth {
    http: Client,
    client_id: String,
    client_secret: String,
    oauth_base_url: String,
    api_base_url: String,
    user_agent: String,
    api_version: String,
}

impl std::fmt::Debug for GitHubOAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHubOAuth")
            .field("client_id", &self.client_id)
            .field("oauth_base_url", &self.oauth_base_url)
            .field("api_base_url", &self.api_base_url)
            .finish_non_exhaustive()
    }
}

impl GitHubOAuth {
    pub fn new(config: &GitHubConfig) -> TrackerResult<Self> {
        let http = Client::builder()
            .build()
            .map_err(|e| TrackerError::Internal(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
            oauth_base_url: config.oauth_base_url.trim_end_matches('/').to_string(),
            api_base_url: config.api_base_url.trim_end_matches('/').to_string(),
            user_agent: config.user_agent.clone(),
            api_version: config.api_version.clone(),
        })
    }
}

#[async_trait]
impl IdentityProvider for GitHubOAuth {
    #[instrument(skip(self, code))]
    async fn exchange_code(&self, code: &str) -> TrackerResult<AccessToken> {
        let url = format!("{}/login/oauth/access_token", self.oauth_base_url);
        let resp = self
            .http
            .post(&url)
            .header("Accept", "application/json")
            .header("User-Agent", &self.user_agent)
            .form(&[
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.as_str()),
                ("code", code),
            ])
            .send()
            .await
            .map_err(|e| translate_transport(&e))?;

        if !resp.status().is_success() {
            warn!(status = resp.status().as_u16(), "OAuth token exchange rejected");
            return Err(TrackerError::OAuth(
                "Failed to exchange code for token".to_string(),
            ));
        }

        let token: TokenResponse = resp.json().await.map_err(|e| translate_transport(&e))?;

        if let Some(error) = token.error {
            warn!(error = %error, "OAuth provider returned an error");
            return Err(TrackerError::OAuth(
                token
                    .error_description
                    .unwrap_or_else(|| "OAuth error".to_string()),
            ));
        }

        match token.access_token {
            Some(t) if !t.is_empty() => Ok(AccessToken::new(t)),
            _ => Err(TrackerError::OAuth(
                "No access token in OAuth response".to_string(),
            )),
        }
    }

    #[instrument(skip(self, token))]
    async fn fetch_user(&self, token: &AccessToken) -> TrackerResult<SessionUser> {
        let url = format!("{}/user", self.api_base_url);
        let resp = self
            .http
            .get(&url)
            .bearer_auth(token.expose())
            .header("Accept", "application/vnd.github+json")
            .header("X-GitHub-Api-Version", &self.api_version)
            .header("User-Agent", &self.user_agent)
            .send()
            .await
            .map_err(|e| translate_transport(&e))?;

        if !resp.status().is_success() {
            warn!(status = resp.status().as_u16(), "user lookup rejected");
            return Err(TrackerError::Unauthorized("Invalid access token".to_string()));
        }

        let user: UserResponse = resp.json().await.map_err(|e| translate_transport(&e))?;
        info!(login = %user.login, "user authenticated");

        Ok(SessionUser {
            login: user.login,
            name: user.name,
            avatar_url: user.avatar_url,
            id: user.id,
        })
    }
}
