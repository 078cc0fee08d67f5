use eyre::{Context, Result, bail};
use reqwest::header::HeaderValue;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Largest page the sub-issue listing endpoint accepts.
pub const MAX_PAGE_SIZE: u32 = 100;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub log_level: Option<String>,
    pub github: GitHubConfig,
    pub batch: BatchConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GitHubConfig {
    pub api_url: String,
    pub api_version: String,
    pub timeout_ms: u64,
    pub user_agent: String,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            api_url: "https://api.github.com".to_string(),
            api_version: "2022-11-28".to_string(),
            timeout_ms: 30000,
            user_agent: format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Paging and batching knobs for a run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    /// Close requests in flight at once
    pub chunk_size: usize,
    /// Items requested per listing page
    pub page_size: u32,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            chunk_size: 10,
            page_size: MAX_PAGE_SIZE,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: Some("info".to_string()),
            github: GitHubConfig::default(),
            batch: BatchConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration with fallback chain, then apply runner environment overrides.
    ///
    /// Search order:
    /// 1. Explicit path if provided
    /// 2. ./close-sub-issues.yml
    /// 3. ~/.config/close-sub-issues/close-sub-issues.yml
    /// 4. Defaults
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        let mut config = Self::load_unvalidated(config_path)?;
        config.apply_env_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    fn load_unvalidated(config_path: Option<&PathBuf>) -> Result<Self> {
        // Explicit path takes precedence
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        let project_name = env!("CARGO_PKG_NAME");

        let local_config = PathBuf::from(format!("{}.yml", project_name));
        if local_config.exists() {
            match Self::load_from_file(&local_config) {
                Ok(config) => return Ok(config),
                Err(e) => {
                    log::warn!("Failed to load config from {}: {}", local_config.display(), e);
                }
            }
        }

        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join(project_name).join(format!("{}.yml", project_name));
            if user_config.exists() {
                match Self::load_from_file(&user_config) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        log::warn!("Failed to load config from {}: {}", user_config.display(), e);
                    }
                }
            }
        }

        log::debug!("No config file found, using defaults");
        Ok(Self::default())
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;

        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;

        log::debug!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }

    /// Apply variables a CI runner exports, e.g. `GITHUB_API_URL` on self-hosted servers.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("GITHUB_API_URL").filter(|url| !url.trim().is_empty()) {
            self.github.api_url = url.trim().to_string();
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.batch.chunk_size == 0 {
            bail!("batch.chunk_size must be at least 1");
        }
        if self.batch.page_size == 0 || self.batch.page_size > MAX_PAGE_SIZE {
            bail!("batch.page_size must be between 1 and {}, got {}", MAX_PAGE_SIZE, self.batch.page_size);
        }
        if self.github.api_url.trim().is_empty() {
            bail!("github.api_url must not be empty");
        }
        if HeaderValue::from_str(&self.github.api_version).is_err() {
            bail!("github.api_version is not a valid header value: {:?}", self.github.api_version);
        }
        if HeaderValue::from_str(&self.github.user_agent).is_err() {
            bail!("github.user_agent is not a valid header value: {:?}", self.github.user_agent);
        }
        Ok(())
    }
}
