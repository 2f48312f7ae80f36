//! Module for the sink configuration builder.
//!
//! [`SaneLogging`] records which sinks to attach and at which thresholds. Nothing
//! happens until [`SaneLogging::apply`] hands the handlers to a [`Logger`].
//!
//! # Examples
//! ```rust,no_run
//! use sane_logging::{Logger, SaneLogging, Severity};
//!
//! let mut logger = Logger::new("app");
//! let mut config = SaneLogging::new();
//! config
//!     .terminal(Severity::Warning)
//!     .file("/tmp/logs", "DEBUG", true);
//! config.apply(&mut logger)?;
//! logger.init()?;
//! # Ok::<(), sane_logging::SaneLoggingError>(())
//! ```

use crate::error::{Result, SaneLoggingError};
use crate::logger::{Handler, Logger};
use crate::severity::Severity;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::subscriber::NoSubscriber;
use tracing_subscriber::fmt::MakeWriter;

/// Terminal threshold used when none is configured.
pub const DEFAULT_TERMINAL_LEVEL: Severity = Severity::Info;

/// File threshold used when none is configured.
pub const DEFAULT_FILE_LEVEL: Severity = Severity::Debug;

/// Name layout of the log file created on each run.
pub const LOG_FILE_NAME_FORMAT: &str = "%Y_%m_%d-%H_%M_%S.log";

/// Terminal sink settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TerminalSink {
    #[serde(default = "default_terminal_level")]
    pub level: Severity,
}

/// File sink settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileSink {
    /// Directory holding the log files. Created, with its parents, if missing.
    pub directory: PathBuf,

    #[serde(default = "default_file_level")]
    pub level: Severity,

    /// Delete every entry directly inside `directory` before the new file is created.
    #[serde(default)]
    pub clean: bool,
}

fn default_terminal_level() -> Severity {
    DEFAULT_TERMINAL_LEVEL
}

fn default_file_level() -> Severity {
    DEFAULT_FILE_LEVEL
}

/// Accumulates terminal and file sink settings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SaneLogging {
    terminal: Option<TerminalSink>,
    file: Option<FileSink>,
}

impl SaneLogging {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a colored standard output sink at `level`.
    ///
    /// A later call replaces an earlier one. [`SaneLogging::terminal_default`] uses
    /// [`DEFAULT_TERMINAL_LEVEL`].
    ///
    /// # Arguments
    ///
    /// * `level` - A [`Severity`] or its label, for example `"WARNING"`.
    ///
    /// # Panics
    ///
    /// Panics if `level` does not name one of the five severities.
    #[track_caller]
    pub fn terminal<L>(&mut self, level: L) -> &mut Self
    where
        L: TryInto<Severity>,
        L::Error: fmt::Display,
    {
        self.terminal = Some(TerminalSink {
            level: checked_level(level),
        });
        self
    }

    /// Attach a file sink writing into `directory` at `level`.
    ///
    /// A later call replaces an earlier one entirely. [`SaneLogging::file_default`]
    /// uses [`DEFAULT_FILE_LEVEL`] without cleaning.
    ///
    /// # Arguments
    ///
    /// * `directory` - Directory receiving the log files, created if missing.
    /// * `level` - A [`Severity`] or its label, for example `"DEBUG"`.
    /// * `clean` - Remove every entry directly inside `directory` first.
    ///
    /// # Panics
    ///
    /// Panics if `level` does not name one of the five severities.
    #[track_caller]
    pub fn file<P, L>(&mut self, directory: P, level: L, clean: bool) -> &mut Self
    where
        P: AsRef<Path>,
        L: TryInto<Severity>,
        L::Error: fmt::Display,
    {
        self.file = Some(FileSink {
            directory: directory.as_ref().to_path_buf(),
            level: checked_level(level),
            clean,
        });
        self
    }

    /// Attach a colored standard output sink at [`DEFAULT_TERMINAL_LEVEL`] (INFO).
    pub fn terminal_default(&mut self) -> &mut Self {
        self.terminal(DEFAULT_TERMINAL_LEVEL)
    }

    /// Attach a file sink in `directory` at [`DEFAULT_FILE_LEVEL`] (DEBUG), keeping
    /// existing entries.
    pub fn file_default<P: AsRef<Path>>(&mut self, directory: P) -> &mut Self {
        self.file(directory, DEFAULT_FILE_LEVEL, false)
    }

    pub fn terminal_sink(&self) -> Option<&TerminalSink> {
        self.terminal.as_ref()
    }

    pub fn file_sink(&self) -> Option<&FileSink> {
        self.file.as_ref()
    }

    /// Build a configuration from already validated sink settings.
    pub fn from_sinks(terminal: Option<TerminalSink>, file: Option<FileSink>) -> Self {
        SaneLogging { terminal, file }
    }

    /// Attach the configured sinks to `logger`.
    ///
    /// Failures to remove old entries while cleaning are logged at ERROR through the
    /// current `tracing` subscriber, or printed on stderr when there is none, and
    /// skipped.
    ///
    /// # Arguments
    ///
    /// * `logger` - The logger receiving the handlers, after any it already has.
    ///
    /// # Returns
    ///
    /// * `Result<()>` - [`SaneLoggingError::Io`] if the directory or the new log file
    ///   cannot be created. Handlers attached before the failure stay attached.
    pub fn apply(self, logger: &mut Logger) -> Result<()> {
        self.apply_with_writer(logger, io::stdout)
    }

    /// Same as [`SaneLogging::apply`], with the terminal sink writing to
    /// `terminal_writer` instead of standard output.
    ///
    /// # Arguments
    ///
    /// * `logger` - The logger receiving the handlers.
    /// * `terminal_writer` - Destination of the colored terminal lines.
    ///
    /// # Returns
    ///
    /// * `Result<()>` - As for [`SaneLogging::apply`].
    pub fn apply_with_writer<W>(self, logger: &mut Logger, terminal_writer: W) -> Result<()>
    where
        W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
    {
        if let Some(terminal) = &self.terminal {
            logger.add_handler(Handler::colored(terminal.level, terminal_writer));
        }

        if let Some(file) = &self.file {
            fs::create_dir_all(&file.directory)
                .map_err(|e| SaneLoggingError::io(&file.directory, e))?;

            if file.clean {
                clean_directory(&file.directory, logger.name())?;
            }

            let path = file.directory.join(log_file_name(&Local::now()));
            logger.add_handler(Handler::file(&path, file.level)?);
        }

        Ok(())
    }
}

/// File name for a log started at `time`.
pub fn log_file_name(time: &DateTime<Local>) -> String {
    time.format(LOG_FILE_NAME_FORMAT).to_string()
}

#[track_caller]
fn checked_level<L>(level: L) -> Severity
where
    L: TryInto<Severity>,
    L::Error: fmt::Display,
{
    match level.try_into() {
        Ok(severity) => severity,
        Err(e) => panic!("{}", e),
    }
}

/// Remove every direct entry of `directory`, logging the ones that cannot be removed.
fn clean_directory(directory: &Path, logger_name: &str) -> Result<()> {
    let entries = fs::read_dir(directory).map_err(|e| SaneLoggingError::io(directory, e))?;

    for entry in entries {
        let removed = entry.and_then(|entry| fs::remove_file(entry.path()));
        if let Err(e) = removed {
            report_clean_failure(logger_name, &e);
        }
    }

    Ok(())
}

fn report_clean_failure(logger_name: &str, error: &io::Error) {
    let unobserved = tracing::dispatcher::get_default(|dispatch| dispatch.is::<NoSubscriber>());
    if unobserved {
        eprintln!("{}: Failed to remove old log file: {}", logger_name, error);
    } else {
        tracing::error!("Failed to remove old log file: {}", error);
    }
}
