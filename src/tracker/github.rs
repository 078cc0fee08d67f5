//! GitHub REST API client implementation
//!
//! This module implements the IssueTracker trait for the GitHub REST API.
//! There is no retry or backoff here: a failed request is reported as is.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue, USER_AGENT};
use reqwest::{Client, Response, StatusCode};

use crate::config::GitHubConfig;
use crate::tracker::client::{IssueTracker, TrackerError};
use crate::tracker::types::{ApiErrorBody, ChildIssue, CreateCommentRequest, IssueState, UpdateIssueRequest};

/// Media type recommended by the REST API
const GITHUB_MEDIA_TYPE: &str = "application/vnd.github+json";

/// GitHub REST API client
pub struct GitHubClient {
    client: Client,
    api_url: String,
}

impl GitHubClient {
    /// Create a client authenticated with `token`
    pub fn new(token: &str, config: &GitHubConfig) -> Result<Self, TrackerError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(GITHUB_MEDIA_TYPE));
        headers.insert(
            "x-github-api-version",
            HeaderValue::from_str(&config.api_version)
                .map_err(|e| TrackerError::InvalidRequest(format!("invalid api version header: {}", e)))?,
        );
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&config.user_agent)
                .map_err(|e| TrackerError::InvalidRequest(format!("invalid user agent header: {}", e)))?,
        );
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", token.trim()))
            .map_err(|_| TrackerError::InvalidToken("token contains characters not allowed in a header".to_string()))?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);

        let client = Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_millis(config.timeout_ms.max(1)))
            .build()?;

        Ok(Self {
            client,
            api_url: config.api_url.trim_end_matches('/').to_string(),
        })
    }

    fn issue_url(&self, owner: &str, repo: &str, number: u64) -> String {
        format!("{}/repos/{}/{}/issues/{}", self.api_url, owner, repo, number)
    }

    /// Turn a non-success response into a tracker error
    async fn error_from_response(response: Response) -> TrackerError {
        let status = response.status();
        let rate_limit_exhausted = response
            .headers()
            .get("x-ratelimit-remaining")
            .and_then(|value| value.to_str().ok())
            .is_some_and(|remaining| remaining.trim() == "0");

        let body = response.text().await.unwrap_or_default();
        let message = match serde_json::from_str::<ApiErrorBody>(&body) {
            Ok(parsed) => parsed.message,
            Err(_) if body.trim().is_empty() => status.canonical_reason().unwrap_or("unknown error").to_string(),
            Err(_) => body.trim().to_string(),
        };

        let status_code = status.as_u16();
        if status == StatusCode::TOO_MANY_REQUESTS || (status == StatusCode::FORBIDDEN && rate_limit_exhausted) {
            TrackerError::RateLimited {
                status: status_code,
                message,
            }
        } else {
            TrackerError::Api {
                status: status_code,
                message,
            }
        }
    }
}

#[async_trait]
impl IssueTracker for GitHubClient {
    async fn list_sub_issues(
        &self,
        owner: &str,
        repo: &str,
        parent: u64,
        page: u32,
        per_page: u32,
    ) -> Result<Vec<ChildIssue>, TrackerError> {
        let url = format!("{}/sub_issues", self.issue_url(owner, repo, parent));
        log::debug!("GET {} page={} per_page={}", url, page, per_page);

        let response = self
            .client
            .get(&url)
            .query(&[("per_page", per_page.to_string()), ("page", page.to_string())])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::error_from_response(response).await);
        }

        let body = response.text().await?;
        let children: Vec<ChildIssue> = serde_json::from_str(&body)?;
        Ok(children)
    }

    async fn set_issue_state(&self, owner: &str, repo: &str, number: u64, state: IssueState) -> Result<(), TrackerError> {
        if state == IssueState::Other {
            return Err(TrackerError::InvalidRequest(format!(
                "cannot move issue #{} to an unknown state",
                number
            )));
        }

        let response = self
            .client
            .patch(self.issue_url(owner, repo, number))
            .json(&UpdateIssueRequest { state })
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::error_from_response(response).await);
        }
        Ok(())
    }

    async fn create_comment(&self, owner: &str, repo: &str, number: u64, body: &str) -> Result<(), TrackerError> {
        let url = format!("{}/comments", self.issue_url(owner, repo, number));
        let response = self.client.post(&url).json(&CreateCommentRequest { body }).send().await?;

        if !response.status().is_success() {
            return Err(Self::error_from_response(response).await);
        }
        Ok(())
    }
}
