//! Error types for close-sub-issues
//!
//! Centralized error handling using thiserror.

use thiserror::Error;

use crate::tracker::TrackerError;

/// All error types that can occur while closing sub-issues
#[derive(Debug, Error)]
pub enum CloserError {
    /// An action input failed validation
    #[error("{0}")]
    InvalidInput(String),

    /// Listing the parent's sub-issues failed; nothing was closed
    #[error("Failed to fetch sub-issues")]
    Fetch(#[source] TrackerError),

    /// The summary comment could not be posted on the parent
    #[error("Failed to post summary comment")]
    Comment(#[source] TrackerError),

    /// An output value could not be reported
    #[error("Output error: {0}")]
    Output(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for close-sub-issues operations
pub type Result<T> = std::result::Result<T, CloserError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_input_error_is_verbatim() {
        let err = CloserError::InvalidInput("Invalid issue_number: \"abc\". Expected a numeric value.".to_string());
        assert_eq!(err.to_string(), "Invalid issue_number: \"abc\". Expected a numeric value.");
    }

    #[test]
    fn test_output_error() {
        let err = CloserError::Output("GITHUB_OUTPUT not writable".to_string());
        assert_eq!(err.to_string(), "Output error: GITHUB_OUTPUT not writable");
    }

    #[test]
    fn test_fetch_error_wraps_tracker_error() {
        let err = CloserError::Fetch(TrackerError::Api {
            status: 404,
            message: "Not Found".to_string(),
        });
        assert_eq!(err.to_string(), "Failed to fetch sub-issues");
        let source = std::error::Error::source(&err).unwrap();
        assert_eq!(source.to_string(), "API error 404: Not Found");
    }

    #[test]
    fn test_comment_error_wraps_tracker_error() {
        let err = CloserError::Comment(TrackerError::Api {
            status: 403,
            message: "Resource not accessible by integration".to_string(),
        });
        assert_eq!(err.to_string(), "Failed to post summary comment");
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: CloserError = io_err.into();
        assert!(matches!(err, CloserError::Io(_)));
        assert!(err.to_string().contains("file not found"));
    }
}
