//! Common test utilities for integration tests
//!
//! Provides in-memory fakes for the host ports and a helper that builds the
//! full router around them.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::Router;
use serde_json::json;

use tracker_proxy::adapters::http::{AppState, CookieSettings, HttpServerConfig, TrackerHttpServer};
use tracker_proxy::domain::models::{
    AccessToken, CreateIssuePayload, RawIssue, SessionConfig, SessionUser,
};
use tracker_proxy::services::{IssueCache, SessionStore};
use tracker_proxy::{IdentityProvider, IssueHost, TrackerError, TrackerResult, TrackerService};

pub const FRONTEND_URL: &str = "https://tracker.example.com";
pub const GOOD_CODE: &str = "good-code";

/// Build a raw issue the way the host would return it.
pub fn raw_issue(number: u64, labels: &[&str]) -> RawIssue {
    let labels: Vec<_> = labels.iter().map(|name| json!({ "name": name })).collect();
    serde_json::from_value(json!({
        "id": 10_000 + number,
        "number": number,
        "title": format!("Issue {number}"),
        "body": "details",
        "state": "open",
        "created_at": "2024-03-01T10:00:00Z",
        "updated_at": "2024-03-02T10:00:00Z",
        "labels": labels,
        "assignee": { "login": "octocat" },
        "html_url": format!("https://github.com/octo-org/tracker/issues/{number}")
    }))
    .expect("fixture issue is valid")
}

/// Fake issue host serving a fixed issue list.
#[derive(Default)]
pub struct FakeHost {
    pub issues: Mutex<Vec<RawIssue>>,
    pub fail_status: Mutex<Option<u16>>,
    pub list_calls: AtomicUsize,
    pub create_calls: AtomicUsize,
    pub last_payload: Mutex<Option<CreateIssuePayload>>,
}

impl FakeHost {
    pub fn with_issues(issues: Vec<RawIssue>) -> Self {
        Self {
            issues: Mutex::new(issues),
            ..Self::default()
        }
    }

    pub fn fail_with(&self, status: u16) {
        *self.fail_status.lock().unwrap() = Some(status);
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn create_calls(&self) -> usize {
        self.create_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl IssueHost for FakeHost {
    async fn list_issues_page(
        &self,
        _credential: &AccessToken,
        _owner: &str,
        _repo: &str,
        page: u32,
        per_page: u32,
    ) -> TrackerResult<Vec<RawIssue>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(status) = *self.fail_status.lock().unwrap() {
            return Err(TrackerError::from_status(status, Some("Not Found".to_string())));
        }

        let issues = self.issues.lock().unwrap();
        let start = ((page - 1) * per_page) as usize;
        Ok(issues
            .iter()
            .skip(start)
            .take(per_page as usize)
            .cloned()
            .collect())
    }

    async fn create_issue(
        &self,
        _credential: &AccessToken,
        _owner: &str,
        _repo: &str,
        payload: &CreateIssuePayload,
    ) -> TrackerResult<RawIssue> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_payload.lock().unwrap() = Some(payload.clone());

        let labels: Vec<&str> = payload.labels.iter().map(String::as_str).collect();
        let mut issue = raw_issue(999, &labels);
        issue.title = payload.title.clone();
        issue.body = Some(payload.body.clone());
        Ok(issue)
    }
}

/// Fake OAuth provider: only [`GOOD_CODE`] exchanges successfully.
pub struct FakeIdentity;

#[async_trait]
impl IdentityProvider for FakeIdentity {
    async fn exchange_code(&self, code: &str) -> TrackerResult<AccessToken> {
        if code == GOOD_CODE {
            Ok(AccessToken::new("gho_fake_token"))
        } else {
            Err(TrackerError::OAuth(
                "The code passed is incorrect or expired.".to_string(),
            ))
        }
    }

    async fn fetch_user(&self, _token: &AccessToken) -> TrackerResult<SessionUser> {
        Ok(SessionUser {
            login: "octocat".to_string(),
            name: Some("The Octocat".to_string()),
            avatar_url: "https://avatars.example.com/u/1".to_string(),
            id: 1,
        })
    }
}

/// Handler state wired to the given fake host.
pub fn test_state(host: Arc<FakeHost>) -> AppState {
    let sessions = SessionStore::with_ttl(Duration::from_secs(60 * 60), 100);
    let cookie = CookieSettings::new(&SessionConfig::default(), sessions.ttl(), true);
    AppState {
        tracker: Arc::new(TrackerService::new(host, Arc::new(IssueCache::new()))),
        identity: Arc::new(FakeIdentity),
        sessions,
        cookie,
        owner: "octo-org".to_string(),
        repo: "tracker".to_string(),
        frontend_url: FRONTEND_URL.to_string(),
    }
}

/// Router wired to the given fake host.
pub fn test_router(host: Arc<FakeHost>) -> Router {
    let state = test_state(host);
    let config = HttpServerConfig {
        allowed_origins: vec![FRONTEND_URL.to_string()],
        ..HttpServerConfig::default()
    };
    TrackerHttpServer::new(state, config).build_router()
}
