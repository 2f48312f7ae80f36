//! Two-sink logging setup on top of `tracing`.
//!
//! [`SaneLogging`] attaches a colored terminal sink and/or a timestamped file sink to a
//! [`Logger`], each with its own severity threshold. The logger is then installed as a
//! `tracing` subscriber.
//!
//! ```rust,no_run
//! use sane_logging::{Logger, SaneLogging};
//!
//! let mut logger = Logger::new("app");
//! let mut config = SaneLogging::new();
//! config.terminal("WARNING").file("/tmp/logs", "DEBUG", true);
//! config.apply(&mut logger)?;
//! logger.init()?;
//!
//! tracing::debug!("only in the file");
//! tracing::warn!("in the file and on the terminal");
//! sane_logging::critical!("everywhere, bold and underlined");
//! # Ok::<(), sane_logging::SaneLoggingError>(())
//! ```

pub mod builder;
pub mod configuration;
pub mod error;
pub mod filter;
pub mod format;
pub mod logger;
pub mod severity;
pub mod utils;

#[cfg(test)]
mod test_support;

pub use builder::{DEFAULT_FILE_LEVEL, DEFAULT_TERMINAL_LEVEL, FileSink, SaneLogging, TerminalSink};
pub use configuration::LoggingSettings;
pub use error::{ParseSeverityError, Result, SaneLoggingError};
pub use filter::SeverityFilter;
pub use format::{ColoredFormatter, PlainFormatter, record_fields};
pub use logger::{BoxedLayer, Handler, HandlerKind, Logger};
pub use severity::Severity;

#[doc(hidden)]
pub mod __private {
    pub use tracing;
}
