//! Domain types for close-sub-issues
//!
//! This module contains the per-run records:
//! - CloseOutcome: result of one close attempt
//! - RunResult: closed/failed numbers and the counts reported at the end
//!
//! Nothing here outlives a single run.

pub mod outcome;

pub use outcome::{CloseOutcome, RunResult};
