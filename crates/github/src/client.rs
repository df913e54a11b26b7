use std::time::Duration;

use async_trait::async_trait;
use pipeline::errors::truncate_for_error;
use pipeline::{ApiService, Issue, IssueSource, RepositoryId, SyncError};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, USER_AGENT};
use tracing::{debug, instrument};

use crate::pagination::next_page_url;
use crate::wire::GithubIssue;

/// Public GitHub REST endpoint.
pub const DEFAULT_API_BASE: &str = "https://api.github.com";

/// Issues requested per page (the endpoint's maximum).
pub const PAGE_SIZE: usize = 100;

const ERROR_BODY_LIMIT: usize = 800;

/// Lists repository issues through the GitHub REST API.
#[derive(Clone)]
pub struct GithubIssueClient {
    http: reqwest::Client,
    api_base: String,
}

impl GithubIssueClient {
    /// Builds a client authenticating every request with `token`.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::InvalidConfiguration`] when the token cannot be
    /// carried in a header or the HTTP client cannot be constructed.
    pub fn new(api_base: &str, token: &str, timeout: Duration) -> Result<Self, SyncError> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static("issue-sheet-sync"));
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(
            "x-github-api-version",
            HeaderValue::from_static("2022-11-28"),
        );
        let auth_header = format!("Bearer {}", token.trim());
        let mut auth_value =
            HeaderValue::from_str(&auth_header).map_err(|_| SyncError::InvalidConfiguration {
                message: "GITHUB_TOKEN contains characters not allowed in a header".to_string(),
            })?;
        auth_value.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth_value);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|error| SyncError::InvalidConfiguration {
                message: format!("failed to create github api client: {error}"),
            })?;
        Ok(Self {
            http,
            api_base: api_base.trim().trim_end_matches('/').to_string(),
        })
    }

    async fn fetch_page(
        &self,
        url: &str,
        first: bool,
    ) -> Result<(Vec<GithubIssue>, Option<String>), SyncError> {
        let mut request = self.http.get(url);
        if first {
            let per_page = PAGE_SIZE.to_string();
            request = request.query(&[
                ("state", "all"),
                ("per_page", per_page.as_str()),
                ("sort", "updated"),
                ("direction", "desc"),
            ]);
        }

        let response = request.send().await.map_err(|error| SyncError::Transport {
            service: ApiService::GitHub,
            message: format!("list issues: {error}"),
        })?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SyncError::ApiStatus {
                service: ApiService::GitHub,
                status: status.as_u16(),
                message: format!("list issues: {}", truncate_for_error(&body, ERROR_BODY_LIMIT)),
            });
        }

        let next = next_page_url(response.headers());
        let page = response
            .json::<Vec<GithubIssue>>()
            .await
            .map_err(|error| SyncError::InvalidResponse {
                service: ApiService::GitHub,
                message: format!("failed to decode issue page: {error}"),
            })?;
        Ok((page, next))
    }
}

#[async_trait]
impl IssueSource for GithubIssueClient {
    #[instrument(name = "github_list_issues", skip_all, fields(repository = %repository))]
    async fn list_issues(&self, repository: &RepositoryId) -> Result<Vec<Issue>, SyncError> {
        let mut url = format!(
            "{}/repos/{}/{}/issues",
            self.api_base,
            repository.owner(),
            repository.name()
        );
        let mut first = true;
        let mut issues = Vec::new();
        let mut pages = 0_usize;
        loop {
            let (page, next) = self.fetch_page(&url, first).await?;
            if page.is_empty() {
                break;
            }
            pages += 1;
            let received = page.len();
            issues.extend(
                page.into_iter()
                    .filter(|entry| !entry.is_pull_request())
                    .map(GithubIssue::into_issue),
            );
            debug!(page = pages, received, total = issues.len(), "Fetched issue page");

            match next {
                Some(next) => {
                    url = next;
                    first = false;
                }
                None => break,
            }
        }
        Ok(issues)
    }
}

#[cfg(test)]
mod tests {
    use httpmock::prelude::*;
    use serde_json::json;

    use super::*;

    fn client(server: &MockServer) -> GithubIssueClient {
        GithubIssueClient::new(&server.base_url(), "test-token", Duration::from_secs(5))
            .expect("client")
    }

    fn repo() -> RepositoryId {
        RepositoryId::parse("octo/repo").expect("repo")
    }

    fn issue_json(number: u64, title: &str) -> serde_json::Value {
        json!({
            "number": number,
            "title": title,
            "state": "open",
            "labels": [],
            "assignees": [],
            "user": {"login": "reporter"},
            "created_at": "2026-01-01T00:00:00Z",
            "updated_at": "2026-01-02T00:00:00Z",
            "html_url": format!("https://github.com/octo/repo/issues/{number}")
        })
    }

    #[tokio::test]
    async fn follows_next_links_and_drops_pull_requests() {
        let server = MockServer::start();
        let next_url = format!("{}/repositories/99/issues?page=2", server.base_url());
        let first = server.mock(|when, then| {
            when.method(GET)
                .path("/repos/octo/repo/issues")
                .query_param("state", "all")
                .query_param("per_page", "100")
                .query_param("sort", "updated")
                .query_param("direction", "desc")
                .header("authorization", "Bearer test-token")
                .header("x-github-api-version", "2022-11-28");
            then.status(200)
                .header("link", format!("<{next_url}>; rel=\"next\""))
                .json_body(json!([
                    issue_json(7, "newest"),
                    {
                        "number": 6,
                        "title": "a pull request",
                        "pull_request": {"url": "https://api.github.com/repos/octo/repo/pulls/6"}
                    }
                ]));
        });
        let second = server.mock(|when, then| {
            when.method(GET)
                .path("/repositories/99/issues")
                .query_param("page", "2");
            then.status(200).json_body(json!([issue_json(3, "older")]));
        });

        let issues = client(&server).list_issues(&repo()).await.expect("issues");

        let numbers: Vec<u64> = issues.iter().map(|i| i.number.as_u64()).collect();
        assert_eq!(numbers, vec![7, 3]);
        first.assert_calls(1);
        second.assert_calls(1);
    }

    #[tokio::test]
    async fn empty_page_ends_pagination() {
        let server = MockServer::start();
        let next_url = format!("{}/repositories/99/issues?page=2", server.base_url());
        let first = server.mock(|when, then| {
            when.method(GET).path("/repos/octo/repo/issues");
            then.status(200)
                .header("link", format!("<{next_url}>; rel=\"next\""))
                .json_body(json!([]));
        });
        let second = server.mock(|when, then| {
            when.method(GET).path("/repositories/99/issues");
            then.status(200).json_body(json!([issue_json(1, "unreachable")]));
        });

        let issues = client(&server).list_issues(&repo()).await.expect("issues");

        assert!(issues.is_empty());
        first.assert_calls(1);
        second.assert_calls(0);
    }

    #[tokio::test]
    async fn error_status_aborts_listing() {
        let server = MockServer::start();
        let next_url = format!("{}/repositories/99/issues?page=2", server.base_url());
        server.mock(|when, then| {
            when.method(GET).path("/repos/octo/repo/issues");
            then.status(200)
                .header("link", format!("<{next_url}>; rel=\"next\""))
                .json_body(json!([issue_json(2, "kept only in memory")]));
        });
        server.mock(|when, then| {
            when.method(GET).path("/repositories/99/issues");
            then.status(502).body("upstream unavailable");
        });

        let error = client(&server).list_issues(&repo()).await.unwrap_err();

        assert_eq!(error.status(), Some(502));
        assert!(error.to_string().starts_with("GitHub API request failed (status=502)"));
        assert!(error.to_string().contains("upstream unavailable"));
    }

    #[tokio::test]
    async fn undecodable_page_is_reported() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/repos/octo/repo/issues");
            then.status(200).json_body(json!({"message": "not a list"}));
        });

        let error = client(&server).list_issues(&repo()).await.unwrap_err();

        assert!(matches!(
            error,
            SyncError::InvalidResponse {
                service: ApiService::GitHub,
                ..
            }
        ));
    }
}
