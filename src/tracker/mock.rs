//! In-memory issue tracker for tests and dry runs against fixtures.
//!
//! Children are kept per parent and paged the way the real listing endpoint
//! pages them. Every call is recorded so callers can assert on what was sent.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;

use super::client::{IssueTracker, TrackerError};
use super::types::{ChildIssue, IssueState};

#[derive(Debug, Default)]
struct Calls {
    list_pages: Vec<u32>,
    close_attempts: Vec<u64>,
    comments: Vec<(u64, String)>,
}

/// Fake tracker with scripted failures.
#[derive(Debug, Default)]
pub struct MockTracker {
    children: Mutex<HashMap<u64, Vec<ChildIssue>>>,
    failing_closes: HashSet<u64>,
    failing_list_page: Option<u32>,
    failing_comments: bool,
    calls: Mutex<Calls>,
    in_flight: AtomicUsize,
    peak_in_flight: AtomicUsize,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl MockTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Link `children` under `parent`, in listing order.
    pub fn with_children(self, parent: u64, children: Vec<ChildIssue>) -> Self {
        lock(&self.children).insert(parent, children);
        self
    }

    /// Make every close of `number` fail with a 422.
    pub fn fail_close(mut self, number: u64) -> Self {
        self.failing_closes.insert(number);
        self
    }

    /// Make the listing request for `page` fail.
    pub fn fail_listing_at(mut self, page: u32) -> Self {
        self.failing_list_page = Some(page);
        self
    }

    /// Make comment creation fail.
    pub fn fail_comments(mut self) -> Self {
        self.failing_comments = true;
        self
    }

    /// Pages requested so far, in request order.
    pub fn list_pages(&self) -> Vec<u32> {
        lock(&self.calls).list_pages.clone()
    }

    /// Issue numbers a close was attempted on, in call order.
    pub fn close_attempts(&self) -> Vec<u64> {
        lock(&self.calls).close_attempts.clone()
    }

    /// Comments that were successfully posted, as (issue, body).
    pub fn comments(&self) -> Vec<(u64, String)> {
        lock(&self.calls).comments.clone()
    }

    /// Highest number of close requests that were outstanding at once.
    pub fn peak_in_flight(&self) -> usize {
        self.peak_in_flight.load(Ordering::SeqCst)
    }

    /// Current state of a child, if any parent lists it.
    pub fn state_of(&self, number: u64) -> Option<IssueState> {
        lock(&self.children)
            .values()
            .flatten()
            .find(|child| child.number == number)
            .map(|child| child.state)
    }
}

#[async_trait]
impl IssueTracker for MockTracker {
    async fn list_sub_issues(
        &self,
        _owner: &str,
        _repo: &str,
        parent: u64,
        page: u32,
        per_page: u32,
    ) -> Result<Vec<ChildIssue>, TrackerError> {
        lock(&self.calls).list_pages.push(page);

        if self.failing_list_page == Some(page) {
            return Err(TrackerError::Api {
                status: 502,
                message: "Bad Gateway".to_string(),
            });
        }

        let children = lock(&self.children);
        let all = children.get(&parent).map(Vec::as_slice).unwrap_or_default();
        let per_page = per_page as usize;
        let start = (page.saturating_sub(1) as usize).saturating_mul(per_page);
        Ok(all.iter().skip(start).take(per_page).cloned().collect())
    }

    async fn set_issue_state(&self, _owner: &str, _repo: &str, number: u64, state: IssueState) -> Result<(), TrackerError> {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak_in_flight.fetch_max(now, Ordering::SeqCst);
        lock(&self.calls).close_attempts.push(number);

        // Let sibling requests start before this one settles
        tokio::task::yield_now().await;

        let result = if self.failing_closes.contains(&number) {
            Err(TrackerError::Api {
                status: 422,
                message: "Validation Failed".to_string(),
            })
        } else {
            for child in lock(&self.children).values_mut().flatten() {
                if child.number == number {
                    child.state = state;
                }
            }
            Ok(())
        };

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        result
    }

    async fn create_comment(&self, _owner: &str, _repo: &str, number: u64, body: &str) -> Result<(), TrackerError> {
        if self.failing_comments {
            return Err(TrackerError::Api {
                status: 403,
                message: "Resource not accessible by integration".to_string(),
            });
        }
        lock(&self.calls).comments.push((number, body.to_string()));
        Ok(())
    }
}
