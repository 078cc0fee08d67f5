//! Action inputs and their validation.
//!
//! Raw inputs arrive as strings from the runner. Nothing here touches the
//! network: a `ParentReference` only exists once every input has been checked.

use std::fmt;

use crate::error::{CloserError, Result};

/// Raw, unvalidated inputs exactly as the runner supplied them.
#[derive(Clone)]
pub struct ActionInputs {
    pub github_token: String,
    pub repository: String,
    pub issue_number: String,
}

impl fmt::Debug for ActionInputs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionInputs")
            .field("github_token", &"<redacted>")
            .field("repository", &self.repository)
            .field("issue_number", &self.issue_number)
            .finish()
    }
}

impl ActionInputs {
    /// Check every input and build the parent reference.
    pub fn validate(&self) -> Result<ParentReference> {
        if self.github_token.trim().is_empty() {
            return Err(CloserError::InvalidInput(
                "Input required and not supplied: github_token".to_string(),
            ));
        }
        let (owner, repo) = parse_repository(&self.repository)?;
        let issue_number = parse_issue_number(&self.issue_number)?;
        Ok(ParentReference {
            owner,
            repo,
            issue_number,
        })
    }
}

/// The parent issue whose sub-issues are being closed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParentReference {
    owner: String,
    repo: String,
    issue_number: u64,
}

impl ParentReference {
    /// Build a reference from already-validated parts.
    pub fn new(owner: impl Into<String>, repo: impl Into<String>, issue_number: u64) -> Self {
        Self {
            owner: owner.into(),
            repo: repo.into(),
            issue_number,
        }
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn repo(&self) -> &str {
        &self.repo
    }

    pub fn issue_number(&self) -> u64 {
        self.issue_number
    }
}

impl fmt::Display for ParentReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}#{}", self.owner, self.repo, self.issue_number)
    }
}

/// Split `owner/name` into its two parts.
///
/// Exactly one `/` is allowed and neither side may be empty.
pub fn parse_repository(raw: &str) -> Result<(String, String)> {
    let invalid = || CloserError::InvalidInput(format!("Invalid repository format: \"{raw}\". Expected \"owner/repo\"."));

    let (owner, name) = raw.split_once('/').ok_or_else(invalid)?;
    if owner.is_empty() || name.is_empty() || name.contains('/') {
        return Err(invalid());
    }
    Ok((owner.to_string(), name.to_string()))
}

/// Parse a base-10 issue number. Zero is not a valid issue.
pub fn parse_issue_number(raw: &str) -> Result<u64> {
    match raw.trim().parse::<u64>() {
        Ok(number) if number > 0 => Ok(number),
        _ => Err(CloserError::InvalidInput(format!(
            "Invalid issue_number: \"{raw}\". Expected a numeric value."
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inputs(repository: &str, issue_number: &str) -> ActionInputs {
        ActionInputs {
            github_token: "test-token".to_string(),
            repository: repository.to_string(),
            issue_number: issue_number.to_string(),
        }
    }

    #[test]
    fn test_validate_well_formed_inputs() {
        let parent = inputs("owner/repo", "123").validate().unwrap();
        assert_eq!(parent.owner(), "owner");
        assert_eq!(parent.repo(), "repo");
        assert_eq!(parent.issue_number(), 123);
        assert_eq!(parent.to_string(), "owner/repo#123");
    }

    #[test]
    fn test_repository_without_slash_is_rejected() {
        let err = inputs("invalid-format", "123").validate().unwrap_err();
        assert!(err.to_string().contains("Invalid repository format"));
        assert!(err.to_string().contains("invalid-format"));
    }

    #[test]
    fn test_repository_shapes() {
        assert!(parse_repository("a/b").is_ok());
        assert!(parse_repository("my-org/my.repo").is_ok());
        assert!(parse_repository("").is_err());
        assert!(parse_repository("/").is_err());
        assert!(parse_repository("/repo").is_err());
        assert!(parse_repository("owner/").is_err());
        assert!(parse_repository("owner/repo/extra").is_err());
        assert!(parse_repository("owner//repo").is_err());
    }

    #[test]
    fn test_issue_number_must_be_numeric() {
        let err = inputs("owner/repo", "not-a-number").validate().unwrap_err();
        assert!(err.to_string().contains("Invalid issue_number"));
    }

    #[test]
    fn test_issue_number_shapes() {
        assert_eq!(parse_issue_number("42").unwrap(), 42);
        assert_eq!(parse_issue_number(" 7 ").unwrap(), 7);
        assert_eq!(parse_issue_number("007").unwrap(), 7);
        assert!(parse_issue_number("").is_err());
        assert!(parse_issue_number("0").is_err());
        assert!(parse_issue_number("-3").is_err());
        assert!(parse_issue_number("12abc").is_err());
        assert!(parse_issue_number("1.5").is_err());
        assert!(parse_issue_number("0x1F").is_err());
    }

    #[test]
    fn test_empty_token_is_rejected() {
        let mut raw = inputs("owner/repo", "1");
        raw.github_token = "  ".to_string();
        let err = raw.validate().unwrap_err();
        assert_eq!(err.to_string(), "Input required and not supplied: github_token");
    }

    #[test]
    fn test_debug_redacts_token() {
        let rendered = format!("{:?}", inputs("owner/repo", "1"));
        assert!(!rendered.contains("test-token"));
        assert!(rendered.contains("<redacted>"));
    }
}
