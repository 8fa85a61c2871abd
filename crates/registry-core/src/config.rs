//! Application configuration
//!
//! Configuration is loaded from:
//! 1. Default values
//! 2. Config file (~/.config/student-registry/config.toml)
//! 3. Environment variables (REGISTRY_* prefix)
//!
//! Environment variables take precedence over config file values.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::storage::SchemaPolicy;

/// Environment variable prefix
const ENV_PREFIX: &str = "REGISTRY";

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Deployment label (development, production, ...), logged at startup
    #[serde(default = "default_env")]
    pub env: String,

    /// Path to the SQLite database file
    #[serde(default = "default_storage_path")]
    pub storage_path: PathBuf,

    /// Drop and recreate the students table on every start
    #[serde(default)]
    pub reset_on_start: bool,

    /// Log level used when RUST_LOG is not set
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// HTTP listener settings
    #[serde(default)]
    pub http_server: HttpServerConfig,
}

/// HTTP listener configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HttpServerConfig {
    /// Socket address to bind (default: "127.0.0.1:8080")
    #[serde(default = "default_address")]
    pub address: String,
}

impl Default for HttpServerConfig {
    fn default() -> Self {
        Self {
            address: default_address(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            env: default_env(),
            storage_path: default_storage_path(),
            reset_on_start: false,
            log_level: default_log_level(),
            http_server: HttpServerConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from default location and environment
    ///
    /// Order of precedence (highest to lowest):
    /// 1. Environment variables (REGISTRY_STORAGE_PATH, REGISTRY_HTTP_ADDRESS, ...)
    /// 2. Config file (~/.config/student-registry/config.toml or REGISTRY_CONFIG)
    /// 3. Default values
    pub fn load() -> Result<Self> {
        Self::load_from_path(&Self::config_file_path())
    }

    /// Load configuration from a specific path
    ///
    /// Environment variables are still applied as overrides.
    /// If the file doesn't exist, defaults are used.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let mut config = if path.exists() {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {:?}", path))?;
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?
        } else {
            Self::default()
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// Load configuration from a path the user named explicitly
    ///
    /// Unlike [`Config::load_from_path`], a missing file is an error.
    pub fn load_required(path: &Path) -> Result<Self> {
        if !path.exists() {
            bail!("Config file does not exist at path: {:?}", path);
        }
        Self::load_from_path(path)
    }

    /// Load configuration from a TOML string (useful for testing)
    pub fn load_from_str(toml_content: &str) -> Result<Self> {
        let mut config: Config =
            toml::from_str(toml_content).context("Failed to parse config TOML")?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(&mut self) {
        // REGISTRY_ENV
        if let Ok(val) = std::env::var(format!("{}_ENV", ENV_PREFIX)) {
            if !val.is_empty() {
                self.env = val;
            }
        }

        // REGISTRY_STORAGE_PATH
        if let Ok(val) = std::env::var(format!("{}_STORAGE_PATH", ENV_PREFIX)) {
            self.storage_path = PathBuf::from(val);
        }

        // REGISTRY_HTTP_ADDRESS
        if let Ok(val) = std::env::var(format!("{}_HTTP_ADDRESS", ENV_PREFIX)) {
            if !val.is_empty() {
                self.http_server.address = val;
            }
        }

        // REGISTRY_RESET_ON_START
        if let Ok(val) = std::env::var(format!("{}_RESET_ON_START", ENV_PREFIX)) {
            self.reset_on_start = val.eq_ignore_ascii_case("true") || val == "1";
        }

        // REGISTRY_LOG_LEVEL
        if let Ok(val) = std::env::var(format!("{}_LOG_LEVEL", ENV_PREFIX)) {
            if !val.is_empty() {
                self.log_level = val;
            }
        }
    }

    /// Get the config file path
    ///
    /// Can be overridden with REGISTRY_CONFIG environment variable
    pub fn config_file_path() -> PathBuf {
        if let Ok(path) = std::env::var(format!("{}_CONFIG", ENV_PREFIX)) {
            return PathBuf::from(path);
        }

        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("student-registry")
            .join("config.toml")
    }

    /// Startup policy for the students table
    pub fn schema_policy(&self) -> SchemaPolicy {
        if self.reset_on_start {
            SchemaPolicy::ResetOnStart
        } else {
            SchemaPolicy::Preserve
        }
    }
}

fn default_env() -> String {
    "development".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_address() -> String {
    "127.0.0.1:8080".to_string()
}

/// Get the default database location
fn default_storage_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("student-registry")
        .join("students.db")
}
