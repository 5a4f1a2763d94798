//! Configuration validation utilities

use super::*;
use crate::core::error::{Error, Result};

const LOG_LEVELS: [&str; 6] = ["trace", "debug", "info", "warn", "error", "off"];

/// Validate the entire configuration
pub fn validate_config(config: &AppConfig) -> Result<()> {
    validate_join_config(&config.join)?;
    validate_io_config(&config.io)?;
    validate_logging_config(&config.logging)?;

    Ok(())
}

/// Validate join configuration
pub fn validate_join_config(config: &JoinConfig) -> Result<()> {
    if config.left_suffix.is_empty() || config.right_suffix.is_empty() {
        return Err(Error::ConfigurationError(
            "join suffixes must not be empty".to_string(),
        ));
    }
    if config.left_suffix == config.right_suffix {
        return Err(Error::ConfigurationError(format!(
            "join suffixes must differ, both are '{}'",
            config.left_suffix
        )));
    }
    Ok(())
}

/// Validate IO configuration
pub fn validate_io_config(config: &IoConfig) -> Result<()> {
    if !config.delimiter.is_ascii() || config.delimiter == '"' || config.delimiter == '\n' {
        return Err(Error::ConfigurationError(format!(
            "delimiter must be a single ASCII character other than quote or newline, got {:?}",
            config.delimiter
        )));
    }
    if config.compression_level > 9 {
        return Err(Error::ConfigurationError(format!(
            "compression_level must be between 0 and 9, got {}",
            config.compression_level
        )));
    }
    if config.merged_prefix.trim().is_empty() {
        return Err(Error::ConfigurationError(
            "merged_prefix must not be empty".to_string(),
        ));
    }
    Ok(())
}

/// Validate logging configuration
pub fn validate_logging_config(config: &LoggingConfig) -> Result<()> {
    let level = config.level.to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        return Err(Error::ConfigurationError(format!(
            "Invalid log level: {}. Must be one of: {}",
            config.level,
            LOG_LEVELS.join(", ")
        )));
    }
    Ok(())
}
