//! Session cookie handling.

use std::sync::Arc;
use std::time::Duration;

use axum::extract::FromRequestParts;
use axum::http::header::COOKIE;
use axum::http::request::Parts;
use axum::http::HeaderMap;

use crate::domain::models::{Session, SessionConfig};

use super::error::ApiError;
use super::server::AppState;

/// Attributes of the session cookie.
#[derive(Debug, Clone)]
pub struct CookieSettings {
    pub name: String,
    pub max_age: Duration,
    /// `SameSite=None; Secure` when set, so the cookie survives cross-site XHR.
    pub secure: bool,
}

impl CookieSettings {
    pub fn new(config: &SessionConfig, max_age: Duration, secure: bool) -> Self {
        Self {
            name: config.cookie_name.clone(),
            max_age,
            secure,
        }
    }

    const fn same_site(&self) -> &'static str {
        if self.secure {
            "SameSite=None; Secure"
        } else {
            "SameSite=Lax"
        }
    }

    /// `Set-Cookie` value carrying a session id.
    pub fn session_cookie(&self, session_id: &str) -> String {
        format!(
            "{}={}; HttpOnly; Path=/; Max-Age={}; {}",
            self.name,
            session_id,
            self.max_age.as_secs(),
            self.same_site()
        )
    }

    /// `Set-Cookie` value that makes the browser drop the cookie.
    pub fn expired_cookie(&self) -> String {
        format!("{}=; HttpOnly; Path=/; Max-Age=0; {}", self.name, self.same_site())
    }

    /// The session id from the request's `Cookie` headers, if present.
    pub fn session_id(&self, headers: &HeaderMap) -> Option<String> {
        headers
            .get_all(COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .flat_map(|value| value.split(';'))
            .filter_map(|pair| pair.trim().split_once('='))
            .find(|(name, value)| *name == self.name && !value.is_empty())
            .map(|(_, value)| value.to_string())
    }
}

/// The caller's session. Rejects with 401 `unauthorized` when absent.
#[derive(Debug, Clone)]
pub struct CurrentSession {
    pub id: String,
    pub session: Arc<Session>,
}

impl FromRequestParts<Arc<AppState>> for CurrentSession {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        state
            .current_session(&parts.headers)
            .await
            .ok_or_else(ApiError::unauthorized)
    }
}
