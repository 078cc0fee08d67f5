//! Output sinks for named run results (`closed_count`, `total_count`).

use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

use crate::error::{CloserError, Result};

/// Receives named output values.
pub trait OutputSink {
    fn set_output(&mut self, name: &str, value: &str) -> Result<()>;
}

/// Appends `name=value` lines to the file a runner exposes through `GITHUB_OUTPUT`.
#[derive(Debug, Clone)]
pub struct GitHubOutputFile {
    path: PathBuf,
}

impl GitHubOutputFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl OutputSink for GitHubOutputFile {
    fn set_output(&mut self, name: &str, value: &str) -> Result<()> {
        if value.contains('\n') || name.contains('=') {
            return Err(CloserError::Output(format!("output {} cannot be written as a single line", name)));
        }
        let mut file = OpenOptions::new().create(true).append(true).open(&self.path)?;
        writeln!(file, "{}={}", name, value)?;
        log::debug!("Set output {}={}", name, value);
        Ok(())
    }
}

/// Prints `name=value` to stdout; used when no runner output file exists.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdoutOutput;

impl OutputSink for StdoutOutput {
    fn set_output(&mut self, name: &str, value: &str) -> Result<()> {
        println!("{}={}", name, value);
        Ok(())
    }
}

/// Keeps outputs in memory, in the order they were set.
#[derive(Debug, Default, Clone)]
pub struct MemoryOutput {
    values: Vec<(String, String)>,
}

impl MemoryOutput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Latest value set for `name`
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values
            .iter()
            .rev()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl OutputSink for MemoryOutput {
    fn set_output(&mut self, name: &str, value: &str) -> Result<()> {
        self.values.push((name.to_string(), value.to_string()));
        Ok(())
    }
}

/// Pick the sink for this process: the runner's output file when present, stdout otherwise.
pub fn from_env() -> Box<dyn OutputSink> {
    match std::env::var_os("GITHUB_OUTPUT") {
        Some(path) if !path.is_empty() => Box::new(GitHubOutputFile::new(path)),
        _ => Box::new(StdoutOutput),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_output_file_appends_lines() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("output");
        fs::write(&path, "earlier=1\n").unwrap();

        let mut sink = GitHubOutputFile::new(&path);
        sink.set_output("closed_count", "11").unwrap();
        sink.set_output("total_count", "12").unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content, "earlier=1\nclosed_count=11\ntotal_count=12\n");
    }

    #[test]
    fn test_output_file_rejects_multiline_value() {
        let dir = TempDir::new().unwrap();
        let mut sink = GitHubOutputFile::new(dir.path().join("output"));
        let err = sink.set_output("closed_count", "1\n2").unwrap_err();
        assert!(matches!(err, CloserError::Output(_)));
    }

    #[test]
    fn test_output_file_missing_directory_is_io_error() {
        let dir = TempDir::new().unwrap();
        let mut sink = GitHubOutputFile::new(dir.path().join("missing").join("output"));
        let err = sink.set_output("closed_count", "0").unwrap_err();
        assert!(matches!(err, CloserError::Io(_)));
    }

    #[test]
    fn test_memory_output_keeps_latest() {
        let mut sink = MemoryOutput::new();
        assert!(sink.is_empty());
        sink.set_output("closed_count", "1").unwrap();
        sink.set_output("closed_count", "2").unwrap();
        assert_eq!(sink.get("closed_count"), Some("2"));
        assert_eq!(sink.get("total_count"), None);
    }
}
