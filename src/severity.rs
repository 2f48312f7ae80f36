//! Module for the severity scale shared by every sink.
//!
//! `tracing` only knows five levels and has no notion of a critical record, so
//! critical records are ERROR events carrying a `critical` field (see [`critical!`]).
//! TRACE has no counterpart here and is treated as an unrecognized severity.
//!
//! [`critical!`]: crate::critical

use crate::error::ParseSeverityError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Metadata};
use tracing_subscriber::filter::LevelFilter;

/// Name of the event field that marks an ERROR event as critical.
pub const CRITICAL_FIELD: &str = "critical";

/// Ordered log severity. Higher values suppress lower-severity output at a sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Severity {
    Debug,
    Info,
    Warning,
    Error,
    Critical,
}

impl Severity {
    /// All severities, least severe first.
    pub const ALL: [Severity; 5] = [
        Severity::Debug,
        Severity::Info,
        Severity::Warning,
        Severity::Error,
        Severity::Critical,
    ];

    /// Upper-case label used in rendered records.
    pub fn label(self) -> &'static str {
        match self {
            Severity::Debug => "DEBUG",
            Severity::Info => "INFO",
            Severity::Warning => "WARNING",
            Severity::Error => "ERROR",
            Severity::Critical => "CRITICAL",
        }
    }

    /// Position in [`Severity::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }

    /// Map a `tracing` level onto the scale. TRACE has no counterpart.
    pub fn from_level(level: Level, critical: bool) -> Option<Self> {
        match level {
            Level::ERROR if critical => Some(Severity::Critical),
            Level::ERROR => Some(Severity::Error),
            Level::WARN => Some(Severity::Warning),
            Level::INFO => Some(Severity::Info),
            Level::DEBUG => Some(Severity::Debug),
            _ => None,
        }
    }

    /// Highest severity a callsite can produce.
    ///
    /// An ERROR callsite that declares a `critical` field may emit CRITICAL records;
    /// whether a given event does depends on the value, see [`Severity::of_event`].
    pub fn from_metadata(metadata: &Metadata<'_>) -> Option<Self> {
        let critical = metadata.fields().field(CRITICAL_FIELD).is_some();
        Self::from_level(*metadata.level(), critical)
    }

    /// Severity of one event, honouring the value of its `critical` field.
    pub fn of_event(event: &Event<'_>) -> Option<Self> {
        let metadata = event.metadata();
        let mut flag = CriticalFlag(false);
        if *metadata.level() == Level::ERROR && metadata.fields().field(CRITICAL_FIELD).is_some() {
            event.record(&mut flag);
        }
        Self::from_level(*metadata.level(), flag.0)
    }

    /// The `tracing` level filter that lets records of this severity through.
    pub fn to_level_filter(self) -> LevelFilter {
        match self {
            Severity::Debug => LevelFilter::DEBUG,
            Severity::Info => LevelFilter::INFO,
            Severity::Warning => LevelFilter::WARN,
            Severity::Error | Severity::Critical => LevelFilter::ERROR,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Severity {
    type Err = ParseSeverityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Severity::ALL
            .into_iter()
            .find(|severity| severity.label() == s)
            .ok_or_else(|| ParseSeverityError(s.to_string()))
    }
}

impl TryFrom<&str> for Severity {
    type Error = ParseSeverityError;

    fn try_from(value: &str) -> Result<Self, ParseSeverityError> {
        value.parse()
    }
}

impl TryFrom<String> for Severity {
    type Error = ParseSeverityError;

    fn try_from(value: String) -> Result<Self, ParseSeverityError> {
        value.parse()
    }
}

impl From<Severity> for String {
    fn from(severity: Severity) -> Self {
        severity.label().to_string()
    }
}

/// Reads the boolean value of the `critical` field.
struct CriticalFlag(bool);

impl Visit for CriticalFlag {
    fn record_bool(&mut self, field: &Field, value: bool) {
        if field.name() == CRITICAL_FIELD {
            self.0 = value;
        }
    }

    fn record_debug(&mut self, _field: &Field, _value: &dyn fmt::Debug) {}
}

/// Emit a critical record: an ERROR event tagged with the `critical` field.
///
/// ```rust
/// sane_logging::critical!("disk {} is gone", "sda");
/// ```
#[macro_export]
macro_rules! critical {
    ($($arg:tt)+) => {
        $crate::__private::tracing::error!(critical = true, $($arg)+)
    };
}
