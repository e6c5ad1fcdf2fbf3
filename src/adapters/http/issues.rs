//! Issue endpoints.

use std::sync::Arc;

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde::Deserialize;

use crate::domain::models::{DomainIssue, NewIssue};
use crate::services::{sort_issues, SortDirection, SortKey};

use super::error::ApiError;
use super::server::AppState;
use super::session::CurrentSession;

/// `GET /issues` query string.
#[derive(Debug, Default, Deserialize)]
pub struct ListIssuesParams {
    /// `true`/`1`/`yes`/`on` bypasses the cache; `false`/`0`/`no`/`off` or
    /// absence does not. Matching ignores case.
    #[serde(default)]
    pub force_refresh: Option<String>,
    #[serde(default)]
    pub sort: Option<SortKey>,
    #[serde(default)]
    pub direction: Option<SortDirection>,
}

impl ListIssuesParams {
    pub fn force_refresh(&self) -> Result<bool, ApiError> {
        let Some(raw) = self.force_refresh.as_deref() else {
            return Ok(false);
        };
        match raw.trim().to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(true),
            "" | "false" | "0" | "no" | "off" => Ok(false),
            _ => Err(ApiError::validation(format!(
                "Invalid force_refresh value: {raw}"
            ))),
        }
    }
}

/// `GET /issues`
pub async fn list_issues(
    State(state): State<Arc<AppState>>,
    current: CurrentSession,
    params: Result<Query<ListIssuesParams>, QueryRejection>,
) -> Result<Json<Vec<DomainIssue>>, ApiError> {
    let Query(params) = params.map_err(|e| ApiError::validation(e.body_text()))?;
    let force_refresh = params.force_refresh()?;

    let mut issues = state
        .tracker
        .list_issues(
            &state.owner,
            &state.repo,
            &current.session.access_token,
            force_refresh,
        )
        .await?;

    if let Some(key) = params.sort {
        sort_issues(&mut issues, key, params.direction.unwrap_or_default());
    }

    Ok(Json(issues))
}

/// `POST /issues`
pub async fn create_issue(
    State(state): State<Arc<AppState>>,
    current: CurrentSession,
    payload: Result<Json<NewIssue>, JsonRejection>,
) -> Result<(StatusCode, Json<DomainIssue>), ApiError> {
    let Json(input) = payload.map_err(|e| ApiError::validation(e.body_text()))?;

    let issue = state
        .tracker
        .create_issue(
            &state.owner,
            &state.repo,
            &current.session.access_token,
            &input,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(issue)))
}
