//! Issue tracker layer - the three remote capabilities the pipeline needs
//!
//! This module provides:
//! - IssueTracker trait for API abstraction
//! - GitHubClient implementation over the REST API
//! - MockTracker, an in-memory fake for tests
//! - Wire types for sub-issues and state changes

pub mod client;
pub mod github;
pub mod mock;
pub mod types;

pub use client::{IssueTracker, TrackerError};
pub use github::GitHubClient;
pub use mock::MockTracker;
pub use types::{ChildIssue, IssueState};
