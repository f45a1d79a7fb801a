//! Configuration system for jpath.
//!
//! This module provides the configuration structure for jpath with sensible defaults
//! and support for serialization/deserialization via serde. Configuration can be loaded
//! from TOML files and merged with command-line arguments.
//!
//! # Example
//!
//! ```
//! use jpath::config::Config;
//!
//! // Use default configuration
//! let config = Config::default();
//! assert_eq!(config.separator, ".");
//! assert!(!config.eager);
//!
//! // Create custom configuration
//! let custom = Config {
//!     separator: "/".to_string(),
//!     ..Config::default()
//! };
//! assert!(custom.validate().is_ok());
//! ```

use crate::path::{JPathError, DEFAULT_SEPARATOR};
use anyhow::Context;
use serde::{Deserialize, Serialize};

/// Configuration for jpath lookups and the command-line tool.
///
/// # Fields
///
/// * `separator` - Path segment separator (default: ".")
/// * `eager` - Expand every JSON-encoded string when loading (default: false)
/// * `log_level` - Log filter used when `RUST_LOG` is unset (default: "warn")
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Path segment separator
    #[serde(default = "default_separator")]
    pub separator: String,

    /// Expand every JSON-encoded string up front instead of on first descent
    #[serde(default)]
    pub eager: bool,

    /// Log filter directive, e.g. "warn" or "jpath=debug"
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_separator() -> String {
    DEFAULT_SEPARATOR.to_string()
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            separator: default_separator(),
            eager: false,
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Returns the path to the config file.
    ///
    /// Uses `~/.config/jpath/config.toml` on all platforms.
    pub fn config_path() -> Option<std::path::PathBuf> {
        dirs::home_dir().map(|mut path| {
            path.push(".config");
            path.push("jpath");
            path.push("config.toml");
            path
        })
    }

    /// Loads configuration from the default config file.
    ///
    /// Returns the default configuration if the file doesn't exist or can't be read.
    pub fn load() -> Self {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    /// Loads configuration from `path`, falling back to defaults.
    ///
    /// An unreadable or invalid file is logged at warn level.
    pub fn load_from(path: &std::path::Path) -> Self {
        Self::try_load_from(path).unwrap_or_else(|err| {
            tracing::warn!("{:#}, using defaults", err);
            Self::default()
        })
    }

    /// Loads configuration from `path`.
    ///
    /// A missing file yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or is not valid TOML.
    pub fn try_load_from(path: &std::path::Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str(&contents)
            .with_context(|| format!("Invalid config file: {}", path.display()))
    }

    /// Saves configuration to the default config file.
    ///
    /// Creates the config directory if it doesn't exist.
    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
        self.save_to(&config_path)
    }

    /// Saves configuration to `path`.
    pub fn save_to(&self, path: &std::path::Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let toml_string = toml::to_string_pretty(self)?;
        std::fs::write(path, toml_string)?;

        Ok(())
    }

    /// Checks that the configuration can be used for lookups.
    ///
    /// # Errors
    ///
    /// Returns [`JPathError::EmptySeparator`] for an empty separator.
    pub fn validate(&self) -> Result<(), JPathError> {
        if self.separator.is_empty() {
            return Err(JPathError::EmptySeparator);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_separator_is_invalid() {
        let config = Config {
            separator: String::new(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: Config = toml::from_str("eager = true").unwrap();
        assert!(config.eager);
        assert_eq!(config.separator, ".");
        assert_eq!(config.log_level, "warn");
    }
}
