//! Module for sane-logging configuration settings.
//!
//! This module defines the JSON settings file that describes which sinks to attach,
//! and provides functions to load and save it and to turn it into a builder.
//!
//! # Details
//! Both sections are optional. A missing section means the sink is not attached, a
//! missing `level` falls back to the sink's default threshold.
//!
//! ```json
//! {
//!   "terminal": { "level": "WARNING" },
//!   "file": { "directory": "/tmp/logs", "level": "DEBUG", "clean": true }
//! }
//! ```

use crate::builder::{FileSink, SaneLogging, TerminalSink};
use crate::error::{Result, SaneLoggingError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// sane-logging configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Colored standard output sink.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub terminal: Option<TerminalSink>,

    /// Timestamped log file sink.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<FileSink>,
}

impl LoggingSettings {
    /// Load settings from the file at `path`.
    ///
    /// # Arguments
    ///
    /// * `path` - Location of the JSON settings file.
    ///
    /// # Returns
    ///
    /// * `Result<LoggingSettings>` - The parsed settings on success.
    pub fn load(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)
            .map_err(|e| SaneLoggingError::Config(format!("Could not read config file: {}", e)))?;
        serde_json::from_str(&json)
            .map_err(|e| SaneLoggingError::Config(format!("Invalid config file format: {}", e)))
    }

    /// Load settings from the default location, or no sinks at all if there is no file.
    ///
    /// # Returns
    ///
    /// * `Result<LoggingSettings>` - The loaded settings on success.
    pub fn load_default() -> Result<Self> {
        let config_path = get_config_path()?;

        if !config_path.exists() {
            return Ok(LoggingSettings::default());
        }

        Self::load(&config_path)
    }

    /// Save settings to the file at `path`, creating parent directories as needed.
    ///
    /// # Returns
    ///
    /// * `Result<()>` - Ok on success or an error if saving fails.
    pub fn save(&self, path: &Path) -> Result<()> {
        // Ensure the configuration directory exists.
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                SaneLoggingError::Config(format!("Could not create config directory: {}", e))
            })?;
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)
            .map_err(|e| SaneLoggingError::Config(format!("Could not write config file: {}", e)))?;
        Ok(())
    }

    /// Whether no sink is configured.
    pub fn is_empty(&self) -> bool {
        self.terminal.is_none() && self.file.is_none()
    }

    /// Turn these settings into a builder ready to be applied.
    pub fn into_builder(self) -> SaneLogging {
        SaneLogging::from_sinks(self.terminal, self.file)
    }
}

impl From<&SaneLogging> for LoggingSettings {
    fn from(config: &SaneLogging) -> Self {
        LoggingSettings {
            terminal: config.terminal_sink().cloned(),
            file: config.file_sink().cloned(),
        }
    }
}

/// Get the path to the default settings file.
///
/// # Returns
///
/// * `Result<PathBuf>` - The settings file path on success.
pub fn get_config_path() -> Result<PathBuf> {
    let config_dir = dirs::config_dir()
        .ok_or_else(|| SaneLoggingError::Config("Could not determine config directory".to_string()))?
        .join("sane-logging");
    Ok(config_dir.join("logging.json"))
}
