//! Module for sane-logging error types.
//!
//! This module defines the error type returned when applying a logging configuration
//! and a convenient Result type alias.
//!
//! # Details
//! Invalid severity labels are a separate error type because the builder treats them
//! as caller bugs rather than runtime failures.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Custom error types for sane-logging
#[derive(Error, Debug)]
pub enum SaneLoggingError {
    #[error("IO error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Failed to install logger: {0}")]
    Init(String),
}

impl SaneLoggingError {
    /// Wrap an IO error together with the path that caused it.
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        SaneLoggingError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Error returned when a string does not name one of the five severities.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unrecognized log level '{0}', expected one of DEBUG, INFO, WARNING, ERROR, CRITICAL")]
pub struct ParseSeverityError(pub String);

/// Result type alias to simplify function signatures
pub type Result<T> = std::result::Result<T, SaneLoggingError>;
