//! close-sub-issues - close every open sub-issue of a parent issue
//!
//! A run fetches the parent's open sub-issues page by page, closes them in
//! bounded concurrent chunks while recording per-child failures, then sets
//! the `closed_count`/`total_count` outputs and comments on the parent.

pub mod config;
pub mod domain;
pub mod error;
pub mod inputs;
pub mod logging;
pub mod output;
pub mod pipeline;
pub mod tracker;

pub use error::{CloserError, Result};
