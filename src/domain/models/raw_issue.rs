//! Issue payloads as exchanged with the host.
//!
//! These map to the GitHub REST API v3 JSON shapes. They are read-only
//! input to the normalizer; the proxy never mutates a [`RawIssue`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::issue::IssueState;

/// An issue returned by the host API.
///
/// Optional fields default to absent so a sparse payload still parses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawIssue {
    /// Unique numeric identifier for the issue.
    pub id: u64,
    /// Sequential number within the repository (e.g., 42 → "#42").
    pub number: u64,
    pub title: String,
    /// Issue body text (may be absent or null).
    #[serde(default)]
    pub body: Option<String>,
    pub state: IssueState,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Labels in host-provided order.
    #[serde(default)]
    pub labels: Vec<RawLabel>,
    #[serde(default)]
    pub assignee: Option<RawUser>,
    /// URL to view the issue in the host UI.
    pub html_url: String,
}

impl RawIssue {
    /// Label names in host-provided order.
    pub fn label_names(&self) -> Vec<String> {
        self.labels.iter().map(|l| l.name.clone()).collect()
    }
}

/// A label applied to a host issue.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawLabel {
    /// The label name (e.g., "bug", "P: High").
    pub name: String,
}

/// The subset of a host user object the proxy reads.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawUser {
    pub login: String,
}

/// Request body for creating a new host issue.
///
/// Exactly `{title, body, assignees, labels}`; the host assigns id,
/// number, state and timestamps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateIssuePayload {
    pub title: String,
    pub body: String,
    /// Zero or one login. The host only accepts a list.
    pub assignees: Vec<String>,
    pub labels: Vec<String>,
}
