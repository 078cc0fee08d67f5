//! Close attempt outcome types.
//!
//! This module defines the result types for a batch of close attempts.

/// Outcome of closing a single sub-issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CloseOutcome {
    pub number: u64,
    /// Error message when the close failed, `None` on success
    pub error: Option<String>,
}

impl CloseOutcome {
    pub fn closed(number: u64) -> Self {
        Self { number, error: None }
    }

    pub fn failed(number: u64, error: impl Into<String>) -> Self {
        Self {
            number,
            error: Some(error.into()),
        }
    }

    pub fn succeeded(&self) -> bool {
        self.error.is_none()
    }
}

/// Final result of a run.
///
/// `total_count` is the size of the open child set, so
/// `closed_count() <= total_count` always holds.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunResult {
    pub total_count: usize,
    pub closed: Vec<u64>,
    pub failed: Vec<u64>,
}

impl RunResult {
    /// Fold outcomes into closed/failed lists, keeping their order.
    pub fn from_outcomes(total_count: usize, outcomes: impl IntoIterator<Item = CloseOutcome>) -> Self {
        let mut result = Self {
            total_count,
            ..Self::default()
        };
        for outcome in outcomes {
            if outcome.succeeded() {
                result.closed.push(outcome.number);
            } else {
                result.failed.push(outcome.number);
            }
        }
        result
    }

    pub fn closed_count(&self) -> usize {
        self.closed.len()
    }

    pub fn has_failures(&self) -> bool {
        !self.failed.is_empty()
    }
}
