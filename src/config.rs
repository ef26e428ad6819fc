use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

use crate::fetch::{devto, github};

const CONFIG_FILE: &str = ".devfolio.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("GitHub username not set (pass --github-user, set DEVFOLIO_GITHUB_USER or [github] username)")]
    MissingUsername,
}

/// Top-level configuration loaded from .devfolio.toml.
/// Every field is optional; the command line overrides what is set here.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub github: GitHubConfig,

    #[serde(default)]
    pub devto: DevToConfig,

    #[serde(default)]
    pub display: DisplayConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GitHubConfig {
    pub username: Option<String>,
    /// Defaults to https://api.github.com
    pub api_base: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DevToConfig {
    /// Defaults to the GitHub username, lowercased
    pub username: Option<String>,
    /// Defaults to https://dev.to
    pub api_base: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DisplayConfig {
    #[serde(default = "default_animate")]
    pub animate: bool,
    #[serde(default = "default_animation_ms")]
    pub animation_ms: u64,
}

fn default_animate() -> bool {
    true
}

fn default_animation_ms() -> u64 {
    crate::animate::DEFAULT_DURATION.as_millis() as u64
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            animate: default_animate(),
            animation_ms: default_animation_ms(),
        }
    }
}

impl Config {
    /// Load configuration from `path`, or from .devfolio.toml in the current
    /// directory. A missing default file yields the default config.
    /// Usernames left unset fall back to DEVFOLIO_GITHUB_USER and
    /// DEVFOLIO_DEVTO_USER.
    pub fn load(path: Option<&Path>) -> Result<Config, ConfigError> {
        let mut config = match path {
            Some(path) => Self::load_from(path)?,
            None if Path::new(CONFIG_FILE).exists() => Self::load_from(Path::new(CONFIG_FILE))?,
            None => Config::default(),
        };

        if config.github.username.is_none() {
            config.github.username = std::env::var("DEVFOLIO_GITHUB_USER").ok();
        }
        if config.devto.username.is_none() {
            config.devto.username = std::env::var("DEVFOLIO_DEVTO_USER").ok();
        }

        Ok(config)
    }

    /// Load from a specific path (useful for testing).
    pub fn load_from(path: &Path) -> Result<Config, ConfigError> {
        let contents = fs::read_to_string(path)?;
        let config = toml::from_str(&contents)?;
        Ok(config)
    }

    pub fn github_user(&self) -> Result<&str, ConfigError> {
        self.github
            .username
            .as_deref()
            .filter(|u| !u.trim().is_empty())
            .ok_or(ConfigError::MissingUsername)
    }

    /// The dev.to username, defaulting to the GitHub one.
    pub fn devto_user(&self) -> Result<String, ConfigError> {
        match self.devto.username.as_deref().filter(|u| !u.trim().is_empty()) {
            Some(user) => Ok(user.to_string()),
            None => Ok(self.github_user()?.to_lowercase()),
        }
    }

    pub fn github_api_base(&self) -> &str {
        self.github.api_base.as_deref().unwrap_or(github::DEFAULT_API_BASE)
    }

    pub fn devto_api_base(&self) -> &str {
        self.devto.api_base.as_deref().unwrap_or(devto::DEFAULT_API_BASE)
    }

    /// Counter animation length, or `None` when animation is disabled.
    pub fn animation(&self) -> Option<Duration> {
        self.display
            .animate
            .then(|| Duration::from_millis(self.display.animation_ms))
    }
}
