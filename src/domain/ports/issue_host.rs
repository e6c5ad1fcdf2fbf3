//! Port for the host's issue REST endpoints.

use async_trait::async_trait;

use crate::domain::errors::TrackerResult;
use crate::domain::models::{AccessToken, CreateIssuePayload, RawIssue};

/// The host's "list issues" and "create issue" endpoints.
///
/// Implementations translate every non-2xx status and transport failure
/// into an upstream or network [`TrackerError`](crate::domain::errors::TrackerError).
/// They never retry.
#[async_trait]
pub trait IssueHost: Send + Sync {
    /// Fetch one page of issues (all states) in host order.
    ///
    /// `page` is 1-based. A page shorter than `per_page` is the last one.
    async fn list_issues_page(
        &self,
        credential: &AccessToken,
        owner: &str,
        repo: &str,
        page: u32,
        per_page: u32,
    ) -> TrackerResult<Vec<RawIssue>>;

    /// Create an issue and return the host's record of it.
    async fn create_issue(
        &self,
        credential: &AccessToken,
        owner: &str,
        repo: &str,
        payload: &CreateIssuePayload,
    ) -> TrackerResult<RawIssue>;
}
