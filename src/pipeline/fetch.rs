//! Fetch stage: page through a parent's sub-issues and keep the open ones.

use std::collections::HashSet;

use log::debug;

use crate::config::MAX_PAGE_SIZE;
use crate::inputs::ParentReference;
use crate::tracker::{IssueTracker, TrackerError};

/// Collect the numbers of every open sub-issue under `parent`, in listing order.
///
/// Paging stops at the first page holding fewer than `page_size` items, which
/// includes an empty page. Any listing failure aborts the whole fetch: a
/// partial set would silently leave children open.
pub async fn fetch_open_children<T>(tracker: &T, parent: &ParentReference, page_size: u32) -> Result<Vec<u64>, TrackerError>
where
    T: IssueTracker + ?Sized,
{
    let page_size = page_size.clamp(1, MAX_PAGE_SIZE);
    let mut open = Vec::new();
    let mut seen = HashSet::new();
    let mut page = 1;

    loop {
        let children = tracker
            .list_sub_issues(parent.owner(), parent.repo(), parent.issue_number(), page, page_size)
            .await?;
        let received = children.len();
        debug!("Page {} returned {} sub-issue(s)", page, received);

        for child in children {
            if !child.is_open() {
                continue;
            }
            if seen.insert(child.number) {
                open.push(child.number);
            } else {
                debug!("Skipping sub-issue #{} listed twice", child.number);
            }
        }

        if received < page_size as usize {
            break;
        }
        page += 1;
    }

    Ok(open)
}
