//! Core tracker trait and error definitions

use async_trait::async_trait;

use super::types::{ChildIssue, IssueState};

/// Stateless issue tracker client - each call is an independent request
#[async_trait]
pub trait IssueTracker: Send + Sync {
    /// Fetch one page of the sub-issues linked under `parent`.
    ///
    /// Pages are 1-based. An empty or short page means there is nothing further.
    async fn list_sub_issues(
        &self,
        owner: &str,
        repo: &str,
        parent: u64,
        page: u32,
        per_page: u32,
    ) -> Result<Vec<ChildIssue>, TrackerError>;

    /// Move an issue to `state`.
    async fn set_issue_state(&self, owner: &str, repo: &str, number: u64, state: IssueState) -> Result<(), TrackerError>;

    /// Post a comment on an issue.
    async fn create_comment(&self, owner: &str, repo: &str, number: u64, body: &str) -> Result<(), TrackerError>;
}

/// Errors that can occur talking to the tracker
#[derive(Debug, thiserror::Error)]
pub enum TrackerError {
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Rate limited ({status}): {message}")]
    RateLimited { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_display() {
        let err = TrackerError::Api {
            status: 422,
            message: "Validation Failed".to_string(),
        };
        assert_eq!(err.to_string(), "API error 422: Validation Failed");
    }

    #[test]
    fn test_rate_limited_display() {
        let err = TrackerError::RateLimited {
            status: 403,
            message: "API rate limit exceeded".to_string(),
        };
        assert_eq!(err.to_string(), "Rate limited (403): API rate limit exceeded");
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: TrackerError = json_err.into();
        assert!(matches!(err, TrackerError::Json(_)));
    }
}
