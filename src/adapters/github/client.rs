//! GitHub REST client for the issue endpoints.
//!
//! Every request carries the caller's OAuth token, so one client instance
//! serves all sessions.

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response};
use tracing::{debug, instrument, warn};

use crate::domain::errors::{TrackerError, TrackerResult};
use crate::domain::models::{AccessToken, CreateIssuePayload, GitHubConfig, RawIssue};
use crate::domain::ports::IssueHost;

use super::error::{translate_status, translate_transport};

/// HTTP client for the GitHub REST API v3.
#[derive(Debug, Clone)]
pub struct GitHubClient {
    http: Client,
    api_base_url: String,
    user_agent: String,
    api_version: String,
}

impl GitHubClient {
    pub fn new(config: &GitHubConfig) -> TrackerResult<Self> {
        let http = Client::builder()
            .build()
            .map_err(|e| TrackerError::Internal(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            api_base_url: config.api_base_url.trim_end_matches('/').to_string(),
            user_agent: config.user_agent.clone(),
            api_version: config.api_version.clone(),
        })
    }

    fn issues_url(&self, owner: &str, repo: &str) -> String {
        format!("{}/repos/{}/{}/issues", self.api_base_url, owner, repo)
    }

    /// Build an authorized request with the standard API headers.
    fn request(&self, method: Method, url: &str, credential: &AccessToken) -> RequestBuilder {
        self.http
            .request(method, url)
            .bearer_auth(credential.expose())
            .header("Accept", "application/vnd.github+json")
            .header("X-GitHub-Api-Version", &self.api_version)
            .header("User-Agent", &self.user_agent)
    }

    /// Send, then turn any non-2xx status into a classified error.
    async fn send(&self, request: RequestBuilder, operation: &str) -> TrackerResult<Response> {
        let resp = request
            .send()
            .await
            .map_err(|e| translate_transport(&e))?;

        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }

        let body = resp.text().await.unwrap_or_default();
        let err = translate_status(status.as_u16(), &body);
        warn!(operation, status = status.as_u16(), kind = err.kind().code(), "GitHub request failed");
        Err(err)
    }
}

#[async_trait]
impl IssueHost for GitHubClient {
    #[instrument(skip(self, credential))]
    async fn list_issues_page(
        &self,
        credential: &AccessToken,
        owner: &str,
        repo: &str,
        page: u32,
        per_page: u32,
    ) -> TrackerResult<Vec<RawIssue>> {
        let url = self.issues_url(owner, repo);
        let request = self.request(Method::GET, &url, credential).query(&[
            ("state", "all".to_string()),
            ("page", page.to_string()),
            ("per_page", per_page.to_string()),
        ]);

        let resp = self.send(request, "list_issues").await?;
        let issues: Vec<RawIssue> = resp.json().await.map_err(|e| translate_transport(&e))?;
        debug!(count = issues.len(), "GitHub issue page received");
        Ok(issues)
    }

    #[instrument(skip(self, credential, payload), fields(title = %payload.title))]
    async fn create_issue(
        &self,
        credential: &AccessToken,
        owner: &str,
        repo: &str,
        payload: &CreateIssuePayload,
    ) -> TrackerResult<RawIssue> {
        let url = self.issues_url(owner, repo);
        let request = self.request(Method::POST, &url, credential).json(payload);

        let resp = self.send(request, "create_issue").await?;
        resp.json::<RawIssue>()
            .await
            .map_err(|e| translate_transport(&e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::ErrorKind;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn issue_json(n: u64) -> serde_json::Value {
        json!({
            "id": 1000 + n,
            "number": n,
            "title": format!("Issue {n}"),
            "body": null,
            "state": "open",
            "created_at": "2024-01-01T00:00:00Z",
            "updated_at": "2024-01-02T00:00:00Z",
            "labels": [{"name": "P: high"}],
            "assignee": null,
            "html_url": format!("https://github.com/o/r/issues/{n}")
        })
    }

    fn client_for(server: &MockServer) -> GitHubClient {
        let config = GitHubConfig {
            api_base_url: server.uri(),
            ..GitHubConfig::default()
        };
        GitHubClient::new(&config).unwrap()
    }

    #[tokio::test]
    async fn test_list_issues_page_sends_query_and_headers() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/repos/o/r/issues"))
            .and(query_param("state", "all"))
            .and(query_param("page", "2"))
            .and(query_param("per_page", "100"))
            .and(header("authorization", "Bearer gho_token"))
            .and(header("accept", "application/vnd.github+json"))
            .and(header("x-github-api-version", "2022-11-28"))
            .and(header("user-agent", "tracker-proxy"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([issue_json(1), issue_json(2)])))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let issues = client
            .list_issues_page(&AccessToken::new("gho_token"), "o", "r", 2, 100)
            .await
            .unwrap();

        assert_eq!(issues.len(), 2);
        assert_eq!(issues[0].number, 1);
        assert_eq!(issues[0].labels[0].name, "P: high");
    }

    #[tokio::test]
    async fn test_list_issues_404() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/repos/o/missing/issues"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({"message": "Not Found"})))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .list_issues_page(&AccessToken::new("t"), "o", "missing", 1, 100)
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::UpstreamNotFound);
        assert_eq!(err.status_code(), 404);
    }

    #[tokio::test]
    async fn test_list_issues_rate_limited() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(429)
                    .set_body_json(json!({"message": "API rate limit exceeded"})),
            )
            .mount(&server)
            .await;

        let err = client_for(&server)
            .list_issues_page(&AccessToken::new("t"), "o", "r", 1, 100)
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::UpstreamRateLimited);
        assert_eq!(
            err.details().unwrap()["upstream_message"],
            "API rate limit exceeded"
        );
    }

    #[tokio::test]
    async fn test_list_issues_malformed_body_is_internal() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .list_issues_page(&AccessToken::new("t"), "o", "r", 1, 100)
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Internal);
    }

    #[tokio::test]
    async fn test_network_failure() {
        let config = GitHubConfig {
            api_base_url: "http://127.0.0.1:1".to_string(),
            ..GitHubConfig::default()
        };
        let client = GitHubClient::new(&config).unwrap();

        let err = client
            .list_issues_page(&AccessToken::new("t"), "o", "r", 1, 100)
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Network);
        assert_eq!(err.status_code(), 502);
    }

    #[tokio::test]
    async fn test_create_issue_posts_payload() {
        let server = MockServer::start().await;
        let payload = CreateIssuePayload {
            title: "Crash".to_string(),
            body: "steps".to_string(),
            assignees: vec!["octocat".to_string()],
            labels: vec!["P: high".to_string(), "T: bug".to_string()],
        };

        Mock::given(method("POST"))
            .and(path("/repos/o/r/issues"))
            .and(header("authorization", "Bearer t"))
            .and(body_json(json!({
                "title": "Crash",
                "body": "steps",
                "assignees": ["octocat"],
                "labels": ["P: high", "T: bug"]
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(issue_json(7)))
            .expect(1)
            .mount(&server)
            .await;

        let created = client_for(&server)
            .create_issue(&AccessToken::new("t"), "o", "r", &payload)
            .await
            .unwrap();

        assert_eq!(created.number, 7);
    }

    #[tokio::test]
    async fn test_create_issue_validation_failure() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(422).set_body_json(json!({"message": "Validation Failed"})),
            )
            .mount(&server)
            .await;

        let payload = CreateIssuePayload {
            title: "t".to_string(),
            body: String::new(),
            assignees: vec![],
            labels: vec![],
        };
        let err = client_for(&server)
            .create_issue(&AccessToken::new("t"), "o", "r", &payload)
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::UpstreamApi);
        assert_eq!(err.status_code(), 422);
    }
}
