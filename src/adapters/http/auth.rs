//! OAuth login, session status and logout.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::header::SET_COOKIE;
use axum::http::HeaderMap;
use axum::response::{AppendHeaders, IntoResponse, Json, Redirect, Response};
use reqwest::Url;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{info, warn};

use crate::domain::errors::TrackerResult;
use crate::domain::models::{Session, SessionUser};

use super::server::AppState;

/// Query string the OAuth provider redirects back with.
#[derive(Debug, Default, Deserialize)]
pub struct CallbackParams {
    pub code: Option<String>,
    /// Set instead of `code` when the user denied access.
    pub error: Option<String>,
}

/// `GET /auth/status` body.
#[derive(Debug, Serialize)]
pub struct AuthStatus {
    pub authenticated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<SessionUser>,
}

/// Frontend URL with `login=<outcome>` appended.
fn login_redirect(frontend_url: &str, outcome: &str) -> String {
    match Url::parse(frontend_url) {
        Ok(mut url) => {
            url.query_pairs_mut().append_pair("login", outcome);
            url.to_string()
        }
        Err(_) => format!("{frontend_url}?login={outcome}"),
    }
}

async fn establish_session(state: &AppState, code: &str) -> TrackerResult<String> {
    let access_token = state.identity.exchange_code(code).await?;
    let user = state.identity.fetch_user(&access_token).await?;
    Ok(state.sessions.create(Session { access_token, user }).await)
}

/// `GET /auth/callback?code=...`
///
/// Always redirects to the frontend; the cookie is only set on success.
pub async fn callback(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(params): Query<CallbackParams>,
) -> Response {
    let code = match (params.code, params.error) {
        (Some(code), _) if !code.is_empty() => code,
        (_, error) => {
            warn!(error = ?error, "OAuth callback without a code");
            return Redirect::to(&login_redirect(&state.frontend_url, "failed")).into_response();
        }
    };

    match establish_session(&state, &code).await {
        Ok(session_id) => {
            if let Some(previous) = state.cookie.session_id(&headers) {
                state.sessions.remove(&previous).await;
            }
            info!("login succeeded");
            (
                AppendHeaders([(SET_COOKIE, state.cookie.session_cookie(&session_id))]),
                Redirect::to(&login_redirect(&state.frontend_url, "success")),
            )
                .into_response()
        }
        Err(err) => {
            warn!(error = err.kind().code(), message = %err, "login failed");
            Redirect::to(&login_redirect(&state.frontend_url, "failed")).into_response()
        }
    }
}

/// `GET /auth/status`
pub async fn status(State(state): State<Arc<AppState>>, headers: HeaderMap) -> Json<AuthStatus> {
    let user = state
        .current_session(&headers)
        .await
        .map(|current| current.session.user.clone());

    Json(AuthStatus {
        authenticated: user.is_some(),
        user,
    })
}

/// `POST /auth/logout`. Succeeds whether or not a session existed.
pub async fn logout(State(state): State<Arc<AppState>>, headers: HeaderMap) -> impl IntoResponse {
    if let Some(id) = state.cookie.session_id(&headers) {
        state.sessions.remove(&id).await;
    }

    (
        AppendHeaders([(SET_COOKIE, state.cookie.expired_cookie())]),
        Json::<Value>(json!({ "message": "Logged out" })),
    )
}
