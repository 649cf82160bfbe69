//! Litex configuration
//!
//! # Lookup order
//!
//! ```text
//! 1. Explicit path (CLI `--config`)
//! 2. `litex.toml` in the working directory
//! 3. Default values
//! ```
//!
//! # Example
//!
//! ```toml
//! [lexer]
//! tab_width = 4
//!
//! [log]
//! level = "debug"
//! ```

use crate::util::logger::LogLevel;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Project configuration file name
pub const CONFIG_FILE_NAME: &str = "litex.toml";

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Config {
    /// Lexer settings
    #[serde(default)]
    pub lexer: LexerConfig,
    /// Logging settings
    #[serde(default)]
    pub log: LogConfig,
}

/// Lexer configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LexerConfig {
    /// Number of spaces a tab expands to before tokenizing
    #[serde(default = "default_tab_width")]
    pub tab_width: usize,
}

fn default_tab_width() -> usize {
    4
}

impl Default for LexerConfig {
    fn default() -> Self {
        Self {
            tab_width: default_tab_width(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct LogConfig {
    /// Minimum level emitted by the CLI logger
    #[serde(default)]
    pub level: LogLevel,
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Config parse error in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("Invalid config: {0}")]
    Invalid(String),
}

impl Config {
    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Load configuration from a file
    ///
    /// A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::debug!("config {} not found, using defaults", path.display());
            return Ok(Config::default());
        }

        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Config::from_toml_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        tracing::debug!("loaded config from {}", path.display());
        Ok(config)
    }

    /// Load the explicit path if given, else `litex.toml` in the working directory
    pub fn discover(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        match explicit {
            Some(path) => Config::load_from(path),
            None => Config::load_from(Path::new(CONFIG_FILE_NAME)),
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.lexer.tab_width == 0 {
            return Err(ConfigError::Invalid(
                "lexer.tab_width must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
