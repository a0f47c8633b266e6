//! Flowview Configuration Module
//!
//! Persistent defaults for the CLI, stored in
//! `~/.config/flowview/config.toml`.
//!
//! ## Priority Order (highest to lowest)
//!
//! 1. Command-line flags
//! 2. Environment variables (`FLOWVIEW_FORMAT`)
//! 3. Config file
//! 4. Built-in defaults

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{FlowViewError, Result};

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct FlowViewConfig {
    /// Default output settings
    #[serde(default)]
    pub defaults: Defaults,
}

/// Default settings
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Defaults {
    /// Output format for `show` ("text" or "json")
    pub format: Option<String>,

    /// Expand the whole graph on load
    #[serde(default)]
    pub expand_all: bool,
}

impl FlowViewConfig {
    /// Get the config directory path
    ///
    /// Returns `~/.config/flowview/` on Unix, `%APPDATA%/flowview/` on Windows
    pub fn config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("flowview")
    }

    /// Get the config file path
    pub fn config_path() -> PathBuf {
        Self::config_dir().join("config.toml")
    }

    /// Load configuration from file
    ///
    /// Returns default config if the file doesn't exist.
    /// Returns an error if the file exists but is malformed.
    pub fn load() -> Result<Self> {
        let path = Self::config_path();

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path).map_err(|e| FlowViewError::ConfigError {
            reason: format!("Failed to read config file: {}", e),
        })?;

        toml::from_str(&content).map_err(|e| FlowViewError::ConfigError {
            reason: format!("Failed to parse config file: {}", e),
        })
    }

    /// Save configuration to file
    ///
    /// Creates the config directory if it doesn't exist.
    pub fn save(&self) -> Result<()> {
        let dir = Self::config_dir();
        let path = Self::config_path();

        if !dir.exists() {
            fs::create_dir_all(&dir).map_err(|e| FlowViewError::ConfigError {
                reason: format!("Failed to create config directory: {}", e),
            })?;
        }

        let content = toml::to_string_pretty(self).map_err(|e| FlowViewError::ConfigError {
            reason: format!("Failed to serialize config: {}", e),
        })?;

        fs::write(&path, content).map_err(|e| FlowViewError::ConfigError {
            reason: format!("Failed to write config file: {}", e),
        })?;

        Ok(())
    }

    /// Merge with environment variables
    ///
    /// Environment variables take precedence over config file values.
    pub fn with_env(mut self) -> Self {
        if let Ok(format) = std::env::var("FLOWVIEW_FORMAT") {
            if !format.is_empty() {
                self.defaults.format = Some(format);
            }
        }

        self
    }

    /// Effective output format ("text" when nothing is configured)
    pub fn format(&self) -> &str {
        self.defaults.format.as_deref().unwrap_or("text")
    }
}
