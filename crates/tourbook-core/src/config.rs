//! Configuration management for the tourbook client

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Prefix for environment overrides, e.g. `TOURBOOK__API__BASE_URL`
pub const ENV_PREFIX: &str = "TOURBOOK";

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Backend connection settings
    #[serde(default)]
    pub api: ApiConfig,

    /// Admin token persistence
    #[serde(default)]
    pub session: SessionConfig,

    /// Admin dashboard behaviour
    #[serde(default)]
    pub dashboard: DashboardConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Backend connection settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL every endpoint path is appended to
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Whole-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Connection establishment timeout in seconds
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,

    /// Bookings per page on the admin list
    #[serde(default = "default_per_page")]
    pub per_page: u32,
}

/// Admin token persistence
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// JSON file holding persisted tokens
    #[serde(default = "default_token_file")]
    pub token_file: PathBuf,

    /// Key the bearer token is stored under
    #[serde(default = "default_storage_key")]
    pub storage_key: String,
}

/// Admin dashboard behaviour
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Jump back to page 1 when the status filter changes
    #[serde(default)]
    pub reset_page_on_filter_change: bool,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter directive when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format
    #[serde(default)]
    pub format: LogFormat,
}

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human readable lines
    #[default]
    Text,
    /// One JSON object per event
    Json,
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => f.write_str("text"),
            Self::Json => f.write_str("json"),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:5000/api".to_string()
}

const fn default_timeout_secs() -> u64 {
    30
}

const fn default_connect_timeout_secs() -> u64 {
    5
}

const fn default_per_page() -> u32 {
    20
}

fn default_token_file() -> PathBuf {
    PathBuf::from(".tourbook-session.json")
}

fn default_storage_key() -> String {
    "adminToken".to_string()
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
            per_page: default_per_page(),
        }
    }
}

impl ApiConfig {
    /// Whole-request timeout
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Connection timeout
    #[must_use]
    pub const fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            token_file: default_token_file(),
            storage_key: default_storage_key(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

impl Config {
    /// Load configuration from `tourbook.toml` (if present) and the environment
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded, parsed or validated.
    pub fn load() -> crate::Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration, layering an explicit file over the default one
    ///
    /// Sources in increasing precedence: `tourbook.{toml,json,yaml}` in the
    /// working directory, `path`, then `TOURBOOK__SECTION__KEY` variables.
    ///
    /// # Errors
    ///
    /// Returns an error if the explicit file is missing, a source cannot be
    /// parsed, or a setting fails validation.
    pub fn load_from(path: Option<&Path>) -> crate::Result<Self> {
        let mut builder = config::Config::builder()
            .add_source(config::File::with_name("tourbook").required(false));

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path).required(true));
        }

        let config: Self = builder
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        config.validate()?;
        Ok(config)
    }

    /// Reject settings the client cannot work with
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidSetting`] naming the first bad key.
    pub fn validate(&self) -> crate::Result<()> {
        let base_url = self.api.base_url.trim();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(crate::Error::invalid_setting(
                "api.base_url",
                format!("expected an http(s) URL, got {base_url:?}"),
            ));
        }
        if self.api.timeout_secs == 0 {
            return Err(crate::Error::invalid_setting(
                "api.timeout_secs",
                "must be at least 1",
            ));
        }
        if self.api.per_page == 0 {
            return Err(crate::Error::invalid_setting(
                "api.per_page",
                "must be at least 1",
            ));
        }
        if self.session.storage_key.trim().is_empty() {
            return Err(crate::Error::invalid_setting(
                "session.storage_key",
                "must not be empty",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;

    #[test]
    fn test_config_default() {
        let config = Config::default();

        assert_eq!(config.api.base_url, "http://localhost:5000/api");
        assert_eq!(config.api.timeout(), Duration::from_secs(30));
        assert_eq!(config.api.connect_timeout(), Duration::from_secs(5));
        assert_eq!(config.api.per_page, 20);
        assert_eq!(config.session.storage_key, "adminToken");
        assert!(!config.dashboard.reset_page_on_filter_change);
        assert_eq!(config.logging.format, LogFormat::Text);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_sections_fill_defaults() {
        let config: Config = serde_json::from_value(serde_json::json!({
            "api": { "per_page": 50 },
            "logging": { "format": "json" }
        }))
        .unwrap();

        assert_eq!(config.api.per_page, 50);
        assert_eq!(config.api.timeout_secs, 30);
        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(config.logging.level, "warn");
        assert_eq!(config.session, SessionConfig::default());
    }

    #[test]
    fn test_load_from_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        fs::write(
            &path,
            r#"
[api]
base_url = "https://tours.example.com/api"
timeout_secs = 10

[dashboard]
reset_page_on_filter_change = true
"#,
        )
        .unwrap();

        let config = Config::load_from(Some(&path)).unwrap();

        assert_eq!(config.api.base_url, "https://tours.example.com/api");
        assert_eq!(config.api.timeout_secs, 10);
        assert_eq!(config.api.per_page, 20);
        assert!(config.dashboard.reset_page_on_filter_change);
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = Config::load_from(Some(&dir.path().join("absent.toml")));
        assert!(matches!(result, Err(crate::Error::Configuration { .. })));
    }

    #[test]
    fn test_invalid_settings_rejected() {
        let mut config = Config::default();
        config.api.base_url = "localhost:5000".to_string();
        let err = config.validate().expect_err("scheme-less URL accepted");
        assert!(err.to_string().contains("api.base_url"));

        let mut config = Config::default();
        config.api.per_page = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.session.storage_key = "  ".to_string();
        assert!(config.validate().is_err());
    }
}
