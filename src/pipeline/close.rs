//! Close stage: close open sub-issues in fixed-size concurrent chunks.
//!
//! A chunk's requests run together and must all settle before the next chunk
//! starts, so at most `chunk_size` close requests are ever outstanding. One
//! child's failure is recorded and logged; it never stops its siblings.

use futures::future::join_all;
use log::{debug, info, warn};

use crate::domain::CloseOutcome;
use crate::inputs::ParentReference;
use crate::tracker::{IssueState, IssueTracker};

/// Attempt to close every number in `numbers` exactly once.
///
/// Outcomes come back chunk by chunk, in chunk order.
pub async fn close_children<T>(tracker: &T, parent: &ParentReference, numbers: &[u64], chunk_size: usize) -> Vec<CloseOutcome>
where
    T: IssueTracker + ?Sized,
{
    let mut outcomes = Vec::with_capacity(numbers.len());

    for (index, chunk) in numbers.chunks(chunk_size.max(1)).enumerate() {
        debug!("Closing chunk {} with {} sub-issue(s)", index + 1, chunk.len());
        let settled = join_all(chunk.iter().map(|&number| close_one(tracker, parent, number))).await;
        outcomes.extend(settled);
    }

    outcomes
}

async fn close_one<T>(tracker: &T, parent: &ParentReference, number: u64) -> CloseOutcome
where
    T: IssueTracker + ?Sized,
{
    match tracker
        .set_issue_state(parent.owner(), parent.repo(), number, IssueState::Closed)
        .await
    {
        Ok(()) => {
            info!("Successfully closed sub-issue #{}", number);
            CloseOutcome::closed(number)
        }
        Err(e) => {
            warn!("Failed to close sub-issue #{}: {}", number, e);
            CloseOutcome::failed(number, e.to_string())
        }
    }
}
