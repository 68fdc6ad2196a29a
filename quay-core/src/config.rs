//! Client configuration.
//!
//! Configuration is persisted as TOML in the platform config directory and
//! can be overridden from the environment (`QUAY_TOKEN`, `QUAY_API_URL`).
//! The API base URL is an ordinary field here rather than process-wide
//! state, so tests point a client at a mock server by building a config.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants;
use crate::error::{QuayError, QuayResult};
use crate::platform;

/// Top-level configuration file contents.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// API connection settings.
    #[serde(default)]
    pub client: ClientConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// API connection settings consumed by the HTTP client.
#[derive(Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// API root, e.g. "https://quay.io/api/v1".
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Bearer token (OAuth application token or robot token).
    #[serde(default)]
    pub token: String,

    /// Ceiling for a whole call in milliseconds.
    #[serde(default = "default_timeout")]
    pub timeout_ms: u64,

    /// Bound on connection setup in milliseconds.
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_ms: u64,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level or filter directive: trace, debug, info, warn, error.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Directory for log files. If empty, uses default location.
    #[serde(default)]
    pub directory: String,

    /// Enable JSON structured logging output.
    #[serde(default)]
    pub json_output: bool,
}

// Default value functions for serde

fn default_base_url() -> String {
    constants::DEFAULT_BASE_URL.to_string()
}

fn default_timeout() -> u64 {
    constants::DEFAULT_TIMEOUT_MS
}

fn default_connect_timeout() -> u64 {
    constants::DEFAULT_CONNECT_TIMEOUT_MS
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            token: String::new(),
            timeout_ms: default_timeout(),
            connect_timeout_ms: default_connect_timeout(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            directory: String::new(),
            json_output: false,
        }
    }
}

// The token never shows up in debug output.
impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let token = if self.token.is_empty() { "" } else { "<redacted>" };
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("token", &token)
            .field("timeout_ms", &self.timeout_ms)
            .field("connect_timeout_ms", &self.connect_timeout_ms)
            .finish()
    }
}

impl ClientConfig {
    /// Default settings with the given token.
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            ..Self::default()
        }
    }

    /// Replace the API root.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Whole-call timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Connection setup timeout.
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }

    /// Whether a token has been provided.
    pub fn is_configured(&self) -> bool {
        !self.token.trim().is_empty()
    }

    /// Normalize a base URL: strip whitespace, stray quotes and trailing slashes.
    pub fn sanitize_base_url(address: &str) -> String {
        address
            .trim()
            .trim_matches('"')
            .trim()
            .trim_end_matches('/')
            .to_string()
    }
}

impl AppConfig {
    /// Load from the default path if present, then apply environment overrides.
    pub fn load_default() -> QuayResult<Self> {
        let path = Self::default_config_path()?;
        Self::load_or_default(&path, |key| std::env::var(key).ok())
    }

    /// Load `path` if it exists, otherwise defaults, then apply overrides
    /// from `lookup`.
    pub fn load_or_default<F>(path: &Path, lookup: F) -> QuayResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = if path.exists() {
            Self::load_from_file(path)?
        } else {
            Self::default()
        };
        config.apply_env_overrides(lookup);
        Ok(config)
    }

    /// Load configuration from a specific file path.
    pub fn load_from_file(path: &Path) -> QuayResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Save configuration to a specific file path.
    pub fn save_to_file(&self, path: &Path) -> QuayResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = toml::to_string_pretty(self)
            .map_err(|e| QuayError::Configuration(format!("failed to serialize config: {e}")))?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Get the default configuration file path.
    pub fn default_config_path() -> QuayResult<PathBuf> {
        Ok(platform::config_dir()?.join("config.toml"))
    }

    /// Get the effective log directory, using the configured path or the default.
    pub fn effective_log_dir(&self) -> QuayResult<PathBuf> {
        if self.logging.directory.is_empty() {
            Ok(platform::data_dir()?.join("logs"))
        } else {
            Ok(PathBuf::from(&self.logging.directory))
        }
    }

    /// Apply `QUAY_TOKEN` and `QUAY_API_URL` through the given lookup.
    ///
    /// Empty values are ignored.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(token) = lookup(constants::env::TOKEN).filter(|v| !v.trim().is_empty()) {
            self.client.token = token.trim().to_string();
        }
        if let Some(url) = lookup(constants::env::BASE_URL).filter(|v| !v.trim().is_empty()) {
            self.client.base_url = ClientConfig::sanitize_base_url(&url);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.client.base_url, "https://quay.io/api/v1");
        assert_eq!(config.client.timeout_ms, 30_000);
        assert_eq!(config.client.connect_timeout_ms, 10_000);
        assert_eq!(config.logging.level, "info");
        assert!(!config.client.is_configured());
    }

    #[test]
    fn test_sanitize_base_url() {
        assert_eq!(
            ClientConfig::sanitize_base_url("  \"https://quay.example.com/api/v1/\"  "),
            "https://quay.example.com/api/v1"
        );
        assert_eq!(
            ClientConfig::sanitize_base_url("http://127.0.0.1:8080//"),
            "http://127.0.0.1:8080"
        );
    }

    #[test]
    fn test_env_overrides() {
        let mut config = AppConfig::default();
        config.apply_env_overrides(|key| match key {
            "QUAY_TOKEN" => Some(" abc123 ".into()),
            "QUAY_API_URL" => Some("http://localhost:9000/api/v1/".into()),
            _ => None,
        });
        assert_eq!(config.client.token, "abc123");
        assert_eq!(config.client.base_url, "http://localhost:9000/api/v1");
    }

    #[test]
    fn test_empty_env_values_ignored() {
        let mut config = AppConfig::default();
        config.client.token = "from-file".into();
        config.apply_env_overrides(|_| Some("   ".into()));
        assert_eq!(config.client.token, "from-file");
        assert_eq!(config.client.base_url, "https://quay.io/api/v1");
    }

    #[test]
    fn test_debug_redacts_token() {
        let config = ClientConfig::with_token("super-secret");
        let debug = format!("{config:?}");
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("<redacted>"));
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: AppConfig = toml::from_str("[client]\ntoken = \"t\"\n").unwrap();
        assert_eq!(config.client.token, "t");
        assert_eq!(config.client.base_url, "https://quay.io/api/v1");
        assert_eq!(config.client.timeout(), Duration::from_secs(30));
        assert!(!config.logging.json_output);
    }
}
