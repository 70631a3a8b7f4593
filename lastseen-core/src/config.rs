//! Configuration loading and management
//!
//! Configuration is loaded from `~/.config/lastseen/config.toml`
//!
//! This module follows the XDG Base Directory Specification:
//! - Config: `$XDG_CONFIG_HOME/lastseen/` (~/.config/lastseen/)
//! - State/Logs: `$XDG_STATE_HOME/lastseen/` (~/.local/state/lastseen/)

use crate::error::{Error, Result};
use crate::strings::Strings;
use crate::types::DateTimeFormat;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Returns a best-effort home directory path.
fn home_dir() -> PathBuf {
    std::env::var_os("HOME")
        .map(PathBuf::from)
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Returns XDG_CONFIG_HOME or ~/.config
fn xdg_config_home() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".config"))
}

/// Returns XDG_STATE_HOME or ~/.local/state
fn xdg_state_home() -> PathBuf {
    std::env::var("XDG_STATE_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".local/state"))
}

/// Main configuration struct
#[derive(Debug, Deserialize, Default)]
pub struct Config {
    /// Date and time display preferences
    #[serde(default)]
    pub format: DateTimeFormat,

    /// Localized string table
    #[serde(default)]
    pub strings: StringsConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl DateTimeFormat {
    /// Validate the `[format]` section, returning error message if invalid
    pub fn validate(&self) -> Result<()> {
        if self.date_separator.is_empty() {
            return Err(Error::Config(
                "format.date_separator must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Localized string table selection
#[derive(Debug, Deserialize, Default, Clone)]
pub struct StringsConfig {
    /// Translation file; the built-in English table is used when unset
    pub path: Option<PathBuf>,
}

/// Logging configuration
#[derive(Debug, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load configuration from the default path
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if !config_path.exists() {
            tracing::info!("No config file found at {:?}, using defaults", config_path);
            return Ok(Config::default());
        }

        Self::load_from(&config_path)
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("failed to read config file {:?}: {}", path, e)))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("failed to parse config: {}", e)))?;

        config.format.validate()?;

        Ok(config)
    }

    /// Loads the configured string table, or the built-in English one.
    pub fn strings(&self) -> Result<Strings> {
        match &self.strings.path {
            Some(path) => Strings::load_from(path),
            None => Ok(Strings::english()),
        }
    }

    /// Returns the default config file path
    ///
    /// `$XDG_CONFIG_HOME/lastseen/config.toml` (~/.config/lastseen/config.toml)
    pub fn config_path() -> PathBuf {
        xdg_config_home().join("lastseen").join("config.toml")
    }

    /// Returns the state directory path (for logs)
    ///
    /// `$XDG_STATE_HOME/lastseen/` (~/.local/state/lastseen/)
    pub fn state_dir() -> PathBuf {
        xdg_state_home().join("lastseen")
    }

    /// Returns the log file path
    ///
    /// `$XDG_STATE_HOME/lastseen/lastseen.log` (~/.local/state/lastseen/lastseen.log)
    pub fn log_path() -> PathBuf {
        Self::state_dir().join("lastseen.log")
    }
}
