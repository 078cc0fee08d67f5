//! Report stage: set the count outputs, post the summary comment, log the totals.

use log::{Level, error, info, log};

use crate::domain::RunResult;
use crate::error::{CloserError, Result};
use crate::inputs::ParentReference;
use crate::output::OutputSink;
use crate::tracker::IssueTracker;

pub const CLOSED_COUNT_OUTPUT: &str = "closed_count";
pub const TOTAL_COUNT_OUTPUT: &str = "total_count";

/// Report the counts to `sink`.
pub fn set_counts<S>(sink: &mut S, result: &RunResult) -> Result<()>
where
    S: OutputSink + ?Sized,
{
    sink.set_output(CLOSED_COUNT_OUTPUT, &result.closed_count().to_string())?;
    sink.set_output(TOTAL_COUNT_OUTPUT, &result.total_count.to_string())?;
    Ok(())
}

fn issue_refs(numbers: &[u64]) -> String {
    numbers.iter().map(|n| format!("#{}", n)).collect::<Vec<_>>().join(" ")
}

/// Body of the parent comment, or `None` when nothing was closed.
pub fn compose_comment(result: &RunResult) -> Option<String> {
    if result.closed.is_empty() {
        return None;
    }
    let mut body = format!("✅ Automatically closed the following sub-issues: {}", issue_refs(&result.closed));
    if result.has_failures() {
        body.push_str(&format!(
            "\n\n⚠️ Failed to close {} sub-issue(s): {}",
            result.failed.len(),
            issue_refs(&result.failed)
        ));
    }
    Some(body)
}

/// Human-readable totals line.
pub fn summary_line(result: &RunResult) -> String {
    let summary = format!("Closed {}/{} sub-issue(s).", result.closed_count(), result.total_count);
    if result.has_failures() {
        format!("{} {} sub-issue(s) failed to close.", summary, result.failed.len())
    } else {
        format!("{} All sub-issues processed successfully.", summary)
    }
}

/// Severity of the totals line: warn when any close failed.
pub fn summary_level(result: &RunResult) -> Level {
    if result.has_failures() { Level::Warn } else { Level::Info }
}

/// Finish a run.
///
/// The comment is attempted even when the counts cannot be written, since it
/// is the only record left on the parent. A comment failure wins over a count
/// failure; either one is returned as an error.
pub async fn report<T, S>(tracker: &T, parent: &ParentReference, result: &RunResult, sink: &mut S) -> Result<()>
where
    T: IssueTracker + ?Sized,
    S: OutputSink + ?Sized,
{
    let counts = set_counts(sink, result);

    if let Some(body) = compose_comment(result) {
        let posted = tracker
            .create_comment(parent.owner(), parent.repo(), parent.issue_number(), &body)
            .await;
        if let Err(e) = posted {
            if let Err(counts_err) = &counts {
                error!("Failed to set outputs: {}", counts_err);
            }
            return Err(CloserError::Comment(e));
        }
        info!("Added comment to parent issue.");
    }

    log!(summary_level(result), "{}", summary_line(result));
    counts
}
