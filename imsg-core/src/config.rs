//! Application configuration management.
//!
//! Handles loading, saving, and accessing configuration for the store path,
//! query parameter policies, and logging. Configuration is persisted as TOML
//! on disk; every field has a serde default so partial files load cleanly.

use std::path::{Path, PathBuf};
use serde::{Deserialize, Serialize};

use crate::constants::{query_limits, APP_NAME};
use crate::error::{ImsgError, ImsgResult};

/// Top-level application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Message store settings.
    #[serde(default)]
    pub store: StoreConfig,

    /// Query parameter policies.
    #[serde(default)]
    pub query: QueryConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Message store configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Path to the Messages SQLite store. If empty, uses the default
    /// location under the user's home directory.
    #[serde(default)]
    pub path: String,
}

/// Defaults and ceilings applied when normalizing caller parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryConfig {
    /// Result limit used when the caller omits one.
    #[serde(default = "default_limit")]
    pub default_limit: i64,

    /// Hard ceiling on result limits.
    #[serde(default = "default_max_limit")]
    pub max_limit: i64,

    /// Lookback hours used when the caller omits them.
    #[serde(default = "default_hours")]
    pub default_hours: f64,

    /// Hard ceiling on lookback hours.
    #[serde(default = "default_max_hours")]
    pub max_hours: f64,

    /// Lookback days used when the caller omits them.
    #[serde(default = "default_days")]
    pub default_days: f64,

    /// Hard ceiling on lookback days.
    #[serde(default = "default_max_days")]
    pub max_days: f64,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Directory for log files. If empty, uses default location.
    #[serde(default)]
    pub directory: String,

    /// Enable JSON structured logging output for the file layer.
    #[serde(default)]
    pub json_output: bool,
}

// Default value functions for serde

fn default_limit() -> i64 {
    query_limits::DEFAULT_LIMIT
}

fn default_max_limit() -> i64 {
    query_limits::MAX_LIMIT
}

fn default_hours() -> f64 {
    query_limits::DEFAULT_HOURS
}

fn default_max_hours() -> f64 {
    query_limits::MAX_HOURS
}

fn default_days() -> f64 {
    query_limits::DEFAULT_DAYS
}

fn default_max_days() -> f64 {
    query_limits::MAX_DAYS
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            store: StoreConfig::default(),
            query: QueryConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self { path: String::new() }
    }
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            default_limit: default_limit(),
            max_limit: default_max_limit(),
            default_hours: default_hours(),
            max_hours: default_max_hours(),
            default_days: default_days(),
            max_days: default_max_days(),
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

impl AppConfig {
    /// Load configuration from the default config file path.
    pub fn load_default() -> ImsgResult<Self> {
        let path = Self::default_config_path()?;
        if path.exists() {
            Self::load_from_file(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific file path.
    pub fn load_from_file(path: &Path) -> ImsgResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Save configuration to a specific file path.
    pub fn save_to_file(&self, path: &Path) -> ImsgResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = toml::to_string_pretty(self)
            .map_err(|e| ImsgError::Config(format!("failed to serialize config: {e}")))?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Get the default configuration file path.
    pub fn default_config_path() -> ImsgResult<PathBuf> {
        let base = dirs::config_dir()
            .ok_or_else(|| ImsgError::Config("could not determine config directory".into()))?;
        Ok(base.join(APP_NAME).join("config.toml"))
    }

    /// Get the effective store path, using the configured path or the
    /// platform default (`~/Library/Messages/chat.db`).
    pub fn effective_store_path(&self) -> ImsgResult<PathBuf> {
        if self.store.path.is_empty() {
            let home = dirs::home_dir()
                .ok_or_else(|| ImsgError::Config("could not determine home directory".into()))?;
            Ok(home.join("Library").join("Messages").join("chat.db"))
        } else {
            Ok(PathBuf::from(&self.store.path))
        }
    }

    /// Get the effective log directory, using the configured path or the
    /// platform data directory.
    pub fn effective_log_dir(&self) -> ImsgResult<PathBuf> {
        if self.logging.directory.is_empty() {
            let base = dirs::data_dir()
                .ok_or_else(|| ImsgError::Config("could not determine data directory".into()))?;
            Ok(base.join(APP_NAME).join("logs"))
        } else {
            Ok(PathBuf::from(&self.logging.directory))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.query.default_limit, 50);
        assert_eq!(config.query.max_limit, 500);
        assert_eq!(config.logging.level, "info");
        assert!(config.store.path.is_empty());
    }

    #[test]
    fn test_effective_store_path_default() {
        let config = AppConfig::default();
        let path = config.effective_store_path().unwrap();
        assert!(path.ends_with("Library/Messages/chat.db"));
    }

    #[test]
    fn test_effective_store_path_override() {
        let mut config = AppConfig::default();
        config.store.path = "/tmp/chat.db".to_string();
        assert_eq!(
            config.effective_store_path().unwrap(),
            PathBuf::from("/tmp/chat.db")
        );
    }

    #[test]
    fn test_roundtrip_toml() {
        let config = AppConfig::default();
        let serialized = toml::to_string_pretty(&config).unwrap();
        let deserialized: AppConfig = toml::from_str(&serialized).unwrap();
        assert_eq!(deserialized.query.max_limit, config.query.max_limit);
        assert_eq!(deserialized.query.default_hours, config.query.default_hours);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let config: AppConfig = toml::from_str("[store]\npath = \"/tmp/x.db\"\n").unwrap();
        assert_eq!(config.store.path, "/tmp/x.db");
        assert_eq!(config.query.default_limit, 50);
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        let mut config = AppConfig::default();
        config.query.max_limit = 100;
        config.save_to_file(&path).unwrap();

        let reloaded = AppConfig::load_from_file(&path).unwrap();
        assert_eq!(reloaded.query.max_limit, 100);
    }
}
