//! Normalized issue model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Issue state as reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueState {
    Open,
    Closed,
}

impl IssueState {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Closed => "closed",
        }
    }
}

/// The proxy's internal issue record.
///
/// A pure projection of the raw issue it was built from: every build
/// replaces the whole record. `priority`, `issue_type` and `client` are
/// derived from prefixed labels and are absent (never empty) when no
/// label carries the prefix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainIssue {
    pub id: u64,
    pub number: u64,
    pub title: String,
    pub body: Option<String>,
    pub state: IssueState,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Raw label names as received, in host order.
    pub labels: Vec<String>,
    pub priority: Option<String>,
    #[serde(rename = "type")]
    pub issue_type: Option<String>,
    pub client: Option<String>,
    pub assignee: Option<String>,
    /// Canonical host link.
    pub url: String,
}

/// Caller-submitted input for issue creation.
///
/// `title` defaults to empty so that a missing title reaches validation
/// instead of failing deserialization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewIssue {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub assignee: Option<String>,
    #[serde(default)]
    pub priority: Option<String>,
    #[serde(default, rename = "type")]
    pub issue_type: Option<String>,
    #[serde(default)]
    pub client: Option<String>,
}

impl NewIssue {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn with_assignee(mut self, login: impl Into<String>) -> Self {
        self.assignee = Some(login.into());
        self
    }

    pub fn with_priority(mut self, priority: impl Into<String>) -> Self {
        self.priority = Some(priority.into());
        self
    }

    pub fn with_type(mut self, issue_type: impl Into<String>) -> Self {
        self.issue_type = Some(issue_type.into());
        self
    }

    pub fn with_client(mut self, client: impl Into<String>) -> Self {
        self.client = Some(client.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_issue_missing_title_deserializes_empty() {
        let input: NewIssue = serde_json::from_str(r#"{"body": "x"}"#).unwrap();
        assert_eq!(input.title, "");
        assert_eq!(input.body.as_deref(), Some("x"));
    }

    #[test]
    fn test_new_issue_type_field_name() {
        let input: NewIssue =
            serde_json::from_str(r#"{"title": "t", "type": "Bug", "priority": "High"}"#).unwrap();
        assert_eq!(input.issue_type.as_deref(), Some("Bug"));
        assert_eq!(input.priority.as_deref(), Some("High"));
        assert!(input.client.is_none());
    }

    #[test]
    fn test_domain_issue_serializes_type_and_nulls() {
        let issue = DomainIssue {
            id: 1,
            number: 2,
            title: "t".to_string(),
            body: None,
            state: IssueState::Open,
            created_at: "2024-01-01T00:00:00Z".parse().unwrap(),
            updated_at: "2024-01-02T00:00:00Z".parse().unwrap(),
            labels: vec![],
            priority: None,
            issue_type: Some("Bug".to_string()),
            client: None,
            assignee: None,
            url: "https://github.com/o/r/issues/2".to_string(),
        };
        let value = serde_json::to_value(&issue).unwrap();
        assert_eq!(value["type"], "Bug");
        assert!(value["priority"].is_null());
        assert_eq!(value["state"], "open");
        assert_eq!(value["created_at"], "2024-01-01T00:00:00Z");
    }
}
