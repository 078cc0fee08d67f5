//! Wire types shared by tracker implementations

use serde::{Deserialize, Serialize};

/// State of an issue as the tracker reports it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum IssueState {
    Open,
    Closed,
    /// Anything the tracker reports that we do not know about
    #[serde(other)]
    Other,
}

/// One entry of a parent's sub-issue listing.
///
/// Only the number and state are read; every other field is ignored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChildIssue {
    pub number: u64,
    pub state: IssueState,
}

impl ChildIssue {
    pub fn open(number: u64) -> Self {
        Self {
            number,
            state: IssueState::Open,
        }
    }

    pub fn closed(number: u64) -> Self {
        Self {
            number,
            state: IssueState::Closed,
        }
    }

    pub fn is_open(&self) -> bool {
        self.state == IssueState::Open
    }
}

/// Body of an issue update request.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct UpdateIssueRequest {
    pub state: IssueState,
}

/// Body of a comment creation request.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct CreateCommentRequest<'a> {
    pub body: &'a str,
}

/// Error payload returned by the REST API on failure.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiErrorBody {
    pub message: String,
}
