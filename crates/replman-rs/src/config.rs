//! Console configuration parsing
//!
//! Parses the YAML config file used by repl-pilot (`~/.repl-pilot/config`).

use crate::error::ReplmanError;
use serde::Deserialize;
use std::path::PathBuf;

fn default_refresh_ms() -> u64 {
    2000
}

/// repl-pilot configuration file
#[derive(Debug, Clone, Deserialize)]
pub struct ConsoleConfig {
    /// Base URL of the replication-manager API (e.g. "https://repman.internal:10005")
    pub url: String,
    /// Basic-auth user name
    #[serde(default)]
    pub username: Option<String>,
    /// Basic-auth password
    #[serde(default)]
    pub password: Option<String>,
    /// Poll interval in milliseconds
    #[serde(default = "default_refresh_ms")]
    pub refresh_ms: u64,
    /// Skip TLS certificate verification (self-signed backends)
    #[serde(default)]
    pub insecure_skip_verify: bool,
}

impl ConsoleConfig {
    /// Load configuration from the default location (~/.repl-pilot/config)
    pub fn load_default() -> Result<Self, ReplmanError> {
        let path = Self::default_path()?;
        Self::load_from(&path)
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &PathBuf) -> Result<Self, ReplmanError> {
        if !path.exists() {
            return Err(ReplmanError::ConfigNotFound(path.display().to_string()));
        }
        let content = std::fs::read_to_string(path)?;
        let config: ConsoleConfig = serde_yaml::from_str(&content)?;
        if config.url.is_empty() {
            return Err(ReplmanError::ConfigInvalid("url must not be empty".to_string()));
        }
        Ok(config)
    }

    /// Get the default config path (~/.repl-pilot/config)
    pub fn default_path() -> Result<PathBuf, ReplmanError> {
        let home = dirs_next::home_dir().ok_or(ReplmanError::NoHomeDirectory)?;
        Ok(home.join(".repl-pilot").join("config"))
    }

    /// Construct a minimal config from a bare URL (CLI-only usage)
    pub fn from_url(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            username: None,
            password: None,
            refresh_ms: default_refresh_ms(),
            insecure_skip_verify: false,
        }
    }
}
