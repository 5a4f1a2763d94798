//! Configuration management for mergequery
//!
//! Settings come from defaults, optionally overridden by a YAML or TOML
//! file. Nothing is read from environment variables.

use crate::core::error::{Error, Result};
use crate::dataframe::JoinSuffixes;
use crate::io::CsvOptions;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub mod loader;
pub mod validation;

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Lookup join settings
    pub join: JoinConfig,
    /// File reading and writing settings
    pub io: IoConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Lookup join configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JoinConfig {
    /// Suffix for left columns whose name also appears on the right
    pub left_suffix: String,
    /// Suffix for right columns whose name also appears on the left
    pub right_suffix: String,
}

/// File reading and writing configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IoConfig {
    /// Field delimiter (a single ASCII character)
    pub delimiter: char,
    /// Prefix of generated merged file names
    pub merged_prefix: String,
    /// Gzip compression level for merged output (0-9)
    pub compression_level: u32,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error, off)
    pub level: String,
}

impl Default for JoinConfig {
    fn default() -> Self {
        let suffixes = JoinSuffixes::default();
        Self {
            left_suffix: suffixes.left,
            right_suffix: suffixes.right,
        }
    }
}

impl Default for IoConfig {
    fn default() -> Self {
        Self {
            delimiter: ',',
            merged_prefix: "merged".to_string(),
            compression_level: 6,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl JoinConfig {
    pub fn suffixes(&self) -> JoinSuffixes {
        JoinSuffixes {
            left: self.left_suffix.clone(),
            right: self.right_suffix.clone(),
        }
    }
}

impl IoConfig {
    /// Reader/writer options; the delimiter must already be validated
    pub fn csv_options(&self) -> CsvOptions {
        CsvOptions {
            delimiter: u8::try_from(self.delimiter).unwrap_or(b','),
            compression_level: self.compression_level.min(9),
        }
    }
}

impl AppConfig {
    /// Load configuration from a file (YAML or TOML)
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        loader::load_from_file(path.as_ref())
    }

    /// Load configuration from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        loader::load_from_yaml(yaml)
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml: &str) -> Result<Self> {
        loader::load_from_toml(toml)
    }

    /// Defaults, overridden by the file when one is given, then validated
    pub fn load<P: AsRef<Path>>(config_file: Option<P>) -> Result<Self> {
        loader::load(config_file)
    }

    /// Validate configuration and return errors if invalid
    pub fn validate(&self) -> Result<()> {
        validation::validate_config(self)
    }

    /// Save configuration to a file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        loader::save_to_file(self, path.as_ref())
    }

    /// Convert to YAML string
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|e| {
            Error::ConfigurationError(format!("Failed to serialize config to YAML: {}", e))
        })
    }

    /// Convert to TOML string
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| {
            Error::ConfigurationError(format!("Failed to serialize config to TOML: {}", e))
        })
    }
}
