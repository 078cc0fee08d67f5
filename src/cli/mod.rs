//! CLI module for close-sub-issues - command-line interface.
//!
//! The three action inputs come from flags or from the `INPUT_*` variables a
//! runner exports for them.

pub mod commands;

pub use commands::Cli;
