//! Configuration management.
//!
//! Loads configuration from ${FATIGUE_HOME}/config.toml with sensible defaults.

use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Default prediction API location.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";

/// Environment variable overriding the configured API base URL.
pub const API_URL_ENV: &str = "FATIGUE_API_URL";

/// Poll loop configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PollingConfig {
    pub max_attempts: u32,
    pub interval_ms: u64,
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            max_attempts: 30,
            interval_ms: 1000,
        }
    }
}

/// Agent status indicator configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatusConfig {
    pub refresh_secs: u64,
}

impl Default for StatusConfig {
    fn default() -> Self {
        Self { refresh_secs: 5 }
    }
}

/// Feedback form configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedbackConfig {
    pub notice_secs: u64,
}

impl Default for FeedbackConfig {
    fn default() -> Self {
        Self { notice_secs: 3 }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the prediction API
    pub api_base_url: String,

    /// Per-request HTTP timeout in seconds (0 disables)
    pub request_timeout_secs: u64,

    pub polling: PollingConfig,

    pub status: StatusConfig,

    pub feedback: FeedbackConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            request_timeout_secs: 10,
            polling: PollingConfig::default(),
            status: StatusConfig::default(),
            feedback: FeedbackConfig::default(),
        }
    }
}

/// Returns the default config template with comments.
///
/// Embedded from default_config.toml at compile time.
fn default_config_template() -> &'static str {
    include_str!("../default_config.toml")
}

impl Config {
    /// Loads configuration from the default path.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load() -> Result<Self> {
        Self::load_from(&paths::config_path())
    }

    /// Loads configuration from a specific path.
    /// Returns defaults if file doesn't exist.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read, parsed, or has
    /// zero polling values.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            let config: Config = toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config from {}", path.display()))?;
            config
                .check()
                .with_context(|| format!("Invalid config in {}", path.display()))?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    /// Writes the commented default template to `path`.
    ///
    /// # Errors
    /// Fails if the file already exists or cannot be written.
    pub fn init(path: &Path) -> Result<()> {
        if path.exists() {
            anyhow::bail!("Config file already exists at {}", path.display());
        }

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        fs::write(path, default_config_template())
            .with_context(|| format!("Failed to write config to {}", path.display()))
    }

    /// Resolves the API base URL with precedence: override > env > config > default.
    ///
    /// # Errors
    /// Returns an error if the winning URL is not a valid URL.
    pub fn resolve_api_base_url(&self, url_override: Option<&str>) -> Result<String> {
        let env_url = std::env::var(API_URL_ENV).ok();
        pick_base_url(url_override, env_url.as_deref(), Some(&self.api_base_url))
    }

    /// Rejects values the poll loop cannot run with.
    fn check(&self) -> Result<()> {
        if self.polling.max_attempts == 0 {
            anyhow::bail!("polling.max_attempts must be at least 1");
        }
        if self.polling.interval_ms == 0 {
            anyhow::bail!("polling.interval_ms must be at least 1");
        }
        Ok(())
    }

    /// Per-request timeout; `None` when disabled.
    pub fn request_timeout(&self) -> Option<Duration> {
        (self.request_timeout_secs > 0).then(|| Duration::from_secs(self.request_timeout_secs))
    }

    pub fn status_refresh_interval(&self) -> Duration {
        Duration::from_secs(self.status.refresh_secs.max(1))
    }

    pub fn feedback_notice_duration(&self) -> Duration {
        Duration::from_secs(self.feedback.notice_secs)
    }
}

/// Picks the first non-empty candidate in precedence order and validates it.
fn pick_base_url(
    cli_url: Option<&str>,
    env_url: Option<&str>,
    config_url: Option<&str>,
) -> Result<String> {
    let chosen = [cli_url, env_url, config_url]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|url| !url.is_empty())
        .unwrap_or(DEFAULT_API_BASE_URL);

    url::Url::parse(chosen).with_context(|| format!("Invalid API base URL: {chosen}"))?;
    Ok(chosen.trim_end_matches('/').to_string())
}

pub mod paths {
    //! Path resolution for configuration and log directories.
    //!
    //! FATIGUE_HOME resolution order:
    //! 1. FATIGUE_HOME environment variable (if set)
    //! 2. ~/.config/fatigue (default)
    //! 3. ./.fatigue when no home directory can be determined

    use std::path::PathBuf;

    /// Returns the fatigue home directory.
    pub fn fatigue_home() -> PathBuf {
        if let Ok(home) = std::env::var("FATIGUE_HOME") {
            return PathBuf::from(home);
        }

        dirs::home_dir().map_or_else(
            || PathBuf::from(".fatigue"),
            |h| h.join(".config").join("fatigue"),
        )
    }

    /// Returns the path to the config.toml file.
    pub fn config_path() -> PathBuf {
        fatigue_home().join("config.toml")
    }

    /// Returns the directory log files are written to.
    pub fn logs_dir() -> PathBuf {
        fatigue_home().join("logs")
    }
}
