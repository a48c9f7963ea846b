//! Configuration System
//!
//! Handles loading CLI configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::client::DEFAULT_API_BASE;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub auth: AuthConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Remote API settings
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Path of the booking history endpoint, relative to `base_url`
    #[serde(default)]
    pub my_bookings_path: Option<String>,
}

fn default_base_url() -> String {
    DEFAULT_API_BASE.to_string()
}

fn default_request_timeout() -> u64 {
    30
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_secs: default_request_timeout(),
            my_bookings_path: None,
        }
    }
}

impl ApiConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Where the bearer token is kept between CLI runs
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    #[serde(default = "default_token_file")]
    pub token_file: String,
}

fn default_token_file() -> String {
    dirs::config_dir()
        .map(|p| p.join("tiketin").join("token").to_string_lossy().to_string())
        .unwrap_or_else(|| "./.tiketin_token".to_string())
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            token_file: default_token_file(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Self::parse(&content).map_err(|error| ConfigError::Parse {
            path: path.to_path_buf(),
            error,
        })
    }

    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> Result<Self, String> {
        toml::from_str(content).map_err(|e| e.to_string())
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("tiketin").join("config.toml")),
            Some(PathBuf::from("./tiketin.toml")),
        ];

        for path in config_paths.iter().flatten() {
            if path.exists() {
                match Self::load_with_env(path) {
                    Ok(config) => {
                        tracing::debug!("Loaded config from {:?}", path);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path, e);
                    }
                }
            }
        }

        Self::from_env()
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup("TIKETIN_API_URL") {
            self.api.base_url = url;
        }
        if let Some(timeout) = lookup("TIKETIN_API_TIMEOUT") {
            if let Ok(secs) = timeout.parse() {
                self.api.request_timeout_secs = secs;
            }
        }
        if let Some(path) = lookup("TIKETIN_MY_BOOKINGS_PATH") {
            self.api.my_bookings_path = Some(path);
        }
        if let Some(token_file) = lookup("TIKETIN_TOKEN_FILE") {
            self.auth.token_file = token_file;
        }
        if let Some(level) = lookup("TIKETIN_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = lookup("TIKETIN_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    format!(
        r#"# Tiketin Configuration
#
# Environment variables override these settings:
# - TIKETIN_API_URL
# - TIKETIN_API_TIMEOUT
# - TIKETIN_MY_BOOKINGS_PATH
# - TIKETIN_TOKEN_FILE
# - TIKETIN_LOG_LEVEL
# - TIKETIN_LOG_FORMAT

[api]
# Base URL of the ticketing REST API
base_url = "{}"

# Request timeout in seconds
request_timeout_secs = 30

# Booking history endpoint used by `tiketin bookings`; unset by default
# my_bookings_path = "/path/on/your/server"

[auth]
# File holding the bearer token written by `tiketin login`
# token_file = "~/.config/tiketin/token"

[logging]
# Log level: trace, debug, info, warn, error
level = "warn"

# Log format: pretty or json
format = "pretty"
"#,
        DEFAULT_API_BASE
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.api.base_url, DEFAULT_API_BASE);
        assert_eq!(config.api.request_timeout(), Duration::from_secs(30));
        assert_eq!(config.logging.level, "warn");
        assert_eq!(config.api.my_bookings_path, None);
        assert!(config.auth.token_file.ends_with("token"));
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = Config::parse(
            r#"
            [api]
            base_url = "http://localhost:6543/api"
            "#,
        )
        .unwrap();

        assert_eq!(config.api.base_url, "http://localhost:6543/api");
        assert_eq!(config.api.request_timeout_secs, 30);
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_generated_config_parses() {
        let config = Config::parse(&generate_default_config()).unwrap();
        assert_eq!(config.api.base_url, DEFAULT_API_BASE);
        assert_eq!(config.api.my_bookings_path, None);
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tiketin.toml");
        std::fs::write(&path, "[logging]\nlevel = \"debug\"\nformat = \"json\"\n").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.format, "json");
    }

    #[test]
    fn test_load_errors() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.toml");
        assert!(matches!(Config::load(&missing), Err(ConfigError::Io { .. })));

        let broken = dir.path().join("broken.toml");
        std::fs::write(&broken, "[api\nbase_url = ").unwrap();
        assert!(matches!(Config::load(&broken), Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn test_overrides() {
        let env: HashMap<&str, &str> = [
            ("TIKETIN_API_URL", "http://staging/api"),
            ("TIKETIN_API_TIMEOUT", "not-a-number"),
            ("TIKETIN_TOKEN_FILE", "/tmp/tok"),
            ("TIKETIN_MY_BOOKINGS_PATH", "/history"),
            ("TIKETIN_LOG_LEVEL", "debug"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config.apply_overrides(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.api.base_url, "http://staging/api");
        assert_eq!(config.api.request_timeout_secs, 30);
        assert_eq!(config.auth.token_file, "/tmp/tok");
        assert_eq!(config.api.my_bookings_path.as_deref(), Some("/history"));
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.format, "pretty");
    }
}
