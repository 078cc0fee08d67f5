//! Close pipeline - fetch open sub-issues, close them in chunks, report
//!
//! Control flows strictly fetch → close → report. A run holds no state of
//! its own: everything it needs comes in through its arguments.

pub mod close;
pub mod fetch;
pub mod report;

use log::info;

use crate::config::BatchConfig;
use crate::domain::RunResult;
use crate::error::{CloserError, Result};
use crate::inputs::ParentReference;
use crate::output::OutputSink;
use crate::tracker::IssueTracker;

pub use close::close_children;
pub use fetch::fetch_open_children;
pub use report::{CLOSED_COUNT_OUTPUT, TOTAL_COUNT_OUTPUT, compose_comment, report};

/// Close every open sub-issue of `parent` and report the outcome.
///
/// Per-child close failures are part of the returned result. Listing and
/// commenting failures are errors; a listing failure sets no outputs.
pub async fn run<T, S>(tracker: &T, parent: &ParentReference, batch: &BatchConfig, sink: &mut S) -> Result<RunResult>
where
    T: IssueTracker + ?Sized,
    S: OutputSink + ?Sized,
{
    info!(
        "Fetching sub-issues for parent issue #{} in {}/{}...",
        parent.issue_number(),
        parent.owner(),
        parent.repo()
    );
    let open = fetch_open_children(tracker, parent, batch.page_size)
        .await
        .map_err(CloserError::Fetch)?;

    if open.is_empty() {
        info!("No open sub-issues found for the parent issue.");
        let result = RunResult::default();
        report::set_counts(sink, &result)?;
        return Ok(result);
    }

    let listed = open.iter().map(u64::to_string).collect::<Vec<_>>().join(", ");
    info!("Found {} open sub-issue(s): {}", open.len(), listed);

    let outcomes = close_children(tracker, parent, &open, batch.chunk_size).await;
    let result = RunResult::from_outcomes(open.len(), outcomes);

    report(tracker, parent, &result, sink).await?;
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::MemoryOutput;
    use crate::tracker::{ChildIssue, MockTracker};

    #[tokio::test]
    async fn test_empty_parent_reports_zero_counts() {
        let tracker = MockTracker::new();
        let mut sink = MemoryOutput::new();
        let parent = ParentReference::new("owner", "repo", 1);

        let result = run(&tracker, &parent, &BatchConfig::default(), &mut sink).await.unwrap();

        assert_eq!(result, RunResult::default());
        assert_eq!(sink.get(CLOSED_COUNT_OUTPUT), Some("0"));
        assert_eq!(sink.get(TOTAL_COUNT_OUTPUT), Some("0"));
        assert!(tracker.close_attempts().is_empty());
        assert!(tracker.comments().is_empty());
    }

    #[tokio::test]
    async fn test_fetch_failure_sets_no_outputs() {
        let tracker = MockTracker::new()
            .with_children(1, vec![ChildIssue::open(2)])
            .fail_listing_at(1);
        let mut sink = MemoryOutput::new();
        let parent = ParentReference::new("owner", "repo", 1);

        let err = run(&tracker, &parent, &BatchConfig::default(), &mut sink)
            .await
            .unwrap_err();

        assert!(matches!(err, CloserError::Fetch(_)));
        assert!(sink.is_empty());
        assert!(tracker.close_attempts().is_empty());
    }

    #[tokio::test]
    async fn test_closed_child_never_targeted() {
        let tracker = MockTracker::new().with_children(
            1,
            vec![ChildIssue::open(1), ChildIssue::open(2), ChildIssue::closed(3)],
        );
        let mut sink = MemoryOutput::new();
        let parent = ParentReference::new("owner", "repo", 1);

        let result = run(&tracker, &parent, &BatchConfig::default(), &mut sink).await.unwrap();

        assert_eq!(result.total_count, 2);
        assert!(!tracker.close_attempts().contains(&3));
    }
}
