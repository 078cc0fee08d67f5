//! CLI argument definitions using clap.

use clap::Parser;
use std::path::PathBuf;

use close_sub_issues::inputs::ActionInputs;

/// Close every open sub-issue of a parent issue and comment with a summary
#[derive(Parser)]
#[command(name = "close-sub-issues")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Token used to authenticate against the issue tracker
    #[arg(long, env = "INPUT_GITHUB_TOKEN", hide_env_values = true)]
    pub github_token: String,

    /// Repository holding the parent issue, as owner/name
    #[arg(long, env = "INPUT_REPOSITORY")]
    pub repository: String,

    /// Number of the parent issue
    #[arg(long, env = "INPUT_ISSUE_NUMBER")]
    pub issue_number: String,

    /// Optional config file path
    #[arg(short, long, env = "CLOSE_SUB_ISSUES_CONFIG")]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Check if verbose mode is enabled
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    /// Raw inputs, still to be validated
    pub fn inputs(&self) -> ActionInputs {
        ActionInputs {
            github_token: self.github_token.clone(),
            repository: self.repository.clone(),
            issue_number: self.issue_number.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_cli_parse_flags() {
        let cli = Cli::try_parse_from([
            "close-sub-issues",
            "--github-token",
            "secret",
            "--repository",
            "owner/repo",
            "--issue-number",
            "123",
        ])
        .unwrap();
        assert_eq!(cli.repository, "owner/repo");
        assert_eq!(cli.issue_number, "123");
        assert!(!cli.is_verbose());
        assert!(cli.config.is_none());

        let inputs = cli.inputs();
        assert_eq!(inputs.github_token, "secret");
        assert_eq!(inputs.validate().unwrap().issue_number(), 123);
    }

    #[test]
    fn test_cli_verbose_and_config() {
        let cli = Cli::try_parse_from([
            "close-sub-issues",
            "--github-token",
            "t",
            "--repository",
            "o/r",
            "--issue-number",
            "1",
            "-v",
            "-c",
            "/path/to/close-sub-issues.yml",
        ])
        .unwrap();
        assert!(cli.is_verbose());
        assert_eq!(cli.config.as_ref(), Some(&PathBuf::from("/path/to/close-sub-issues.yml")));
    }

    #[test]
    fn test_issue_number_is_not_parsed_by_clap() {
        // Validation owns the error message for bad numbers
        let cli = Cli::try_parse_from([
            "close-sub-issues",
            "--github-token",
            "t",
            "--repository",
            "o/r",
            "--issue-number",
            "not-a-number",
        ])
        .unwrap();
        let err = cli.inputs().validate().unwrap_err();
        assert!(err.to_string().contains("Invalid issue_number"));
    }
}
