//! Configuration management for session-timeout.
//!
//! Configuration is loaded with the following priority (highest to lowest):
//! 1. Environment variables
//! 2. Configuration file (JSON)
//! 3. Default values

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::policy::{DefaultPolicy, SessionTimeoutMode, TimeoutMode};

/// Application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Process-wide session timeout defaults.
    pub session: SessionSection,
    /// Logging configuration.
    pub logging: LoggingSection,
}

/// Default session timeout policy.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionSection {
    /// `MAX_LENGTH` or `LAST_ACCESSED`.
    pub mode: TimeoutMode,
    /// Session lifetime in seconds.
    pub timeout_secs: u64,
    /// Minimum seconds between persisted last-access updates.
    pub update_interval_secs: u64,
}

impl Default for SessionSection {
    fn default() -> Self {
        let defaults = DefaultPolicy::default();
        Self {
            mode: defaults.mode.into(),
            timeout_secs: defaults.timeout_secs,
            update_interval_secs: defaults.update_interval_secs,
        }
    }
}

/// Logging configuration section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Log level (error, warn, info, debug, trace).
    pub level: String,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::Io)?;
        serde_json::from_str(&content).map_err(ConfigError::Json)
    }

    /// Apply environment variable overrides.
    ///
    /// Unparseable values are ignored with a warning.
    pub fn apply_env(&mut self) {
        if let Ok(mode) = std::env::var("SESSION_TIMEOUT_MODE") {
            match mode.parse() {
                Ok(mode) => self.session.mode = mode,
                Err(_) => tracing::warn!(value = %mode, "ignoring invalid SESSION_TIMEOUT_MODE"),
            }
        }

        if let Ok(secs) = std::env::var("SESSION_TIMEOUT_SECS") {
            match secs.parse() {
                Ok(secs) => self.session.timeout_secs = secs,
                Err(_) => tracing::warn!(value = %secs, "ignoring invalid SESSION_TIMEOUT_SECS"),
            }
        }

        if let Ok(secs) = std::env::var("SESSION_TIMEOUT_UPDATE_INTERVAL_SECS") {
            match secs.parse() {
                Ok(secs) => self.session.update_interval_secs = secs,
                Err(_) => tracing::warn!(
                    value = %secs,
                    "ignoring invalid SESSION_TIMEOUT_UPDATE_INTERVAL_SECS"
                ),
            }
        }

        if let Ok(level) = std::env::var("SESSION_TIMEOUT_LOG_LEVEL") {
            self.logging.level = level;
        } else if let Ok(level) = std::env::var("RUST_LOG") {
            self.logging.level = level;
        }
    }

    /// Load configuration with full priority chain.
    ///
    /// Priority: env vars > config file > defaults
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Config::from_file(path)?,
            None => Config::default(),
        };

        config.apply_env();

        Ok(config)
    }

    /// Build and validate the process-wide default policy.
    pub fn default_policy(&self) -> Result<DefaultPolicy, ConfigError> {
        let policy = DefaultPolicy {
            mode: SessionTimeoutMode::from(self.session.mode),
            timeout_secs: self.session.timeout_secs,
            update_interval_secs: self.session.update_interval_secs,
        };
        policy
            .validate()
            .map_err(|e| ConfigError::InvalidPolicy(e.to_string()))?;
        Ok(policy)
    }

    /// Get the log level filter string.
    pub fn log_filter(&self) -> &str {
        &self.logging.level
    }
}

/// Configuration errors.
#[derive(Debug)]
pub enum ConfigError {
    /// IO error reading config file.
    Io(std::io::Error),
    /// JSON parsing error.
    Json(serde_json::Error),
    /// Session defaults do not form a usable policy.
    InvalidPolicy(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "failed to read config file: {}", e),
            Self::Json(e) => write!(f, "failed to parse config file: {}", e),
            Self::InvalidPolicy(reason) => write!(f, "invalid session defaults: {}", reason),
        }
    }
}

impl std::error::Error for ConfigError {}
