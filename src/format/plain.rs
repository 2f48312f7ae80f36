//! Fixed plain-text layout used by the file sink.

use crate::severity::Severity;
use std::fmt;
use std::path::Path;
use tracing::{Event, Subscriber};
use tracing_log::NormalizeEvent;
use tracing_subscriber::fmt::FmtContext;
use tracing_subscriber::fmt::format::{FormatEvent, FormatFields, Writer};
use tracing_subscriber::fmt::time::{ChronoLocal, FormatTime};
use tracing_subscriber::registry::LookupSpan;

/// Timestamp layout, matching `2024-03-09 14:02:11,057`.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S,%3f";

/// `[<timestamp>][<LEVEL>][<source-file>:<line>]: <message>`
#[derive(Debug, Clone)]
pub struct PlainFormatter {
    timer: ChronoLocal,
}

impl PlainFormatter {
    pub fn new() -> Self {
        PlainFormatter {
            timer: ChronoLocal::new(TIMESTAMP_FORMAT.to_string()),
        }
    }
}

impl Default for PlainFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl<S, N> FormatEvent<S, N> for PlainFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let normalized = event.normalized_metadata();
        let metadata = normalized.as_ref().unwrap_or_else(|| event.metadata());

        write!(writer, "[")?;
        self.timer.format_time(&mut writer)?;
        match Severity::of_event(event) {
            Some(severity) => write!(writer, "][{}]", severity.label())?,
            None => write!(writer, "][{}]", metadata.level())?,
        }

        // Only the base name of the source file is printed.
        let file = metadata
            .file()
            .map(|file| {
                Path::new(file)
                    .file_name()
                    .and_then(|name| name.to_str())
                    .unwrap_or(file)
            })
            .unwrap_or("<unknown>");
        match metadata.line() {
            Some(line) => write!(writer, "[{}:{}]: ", file, line)?,
            None => write!(writer, "[{}:?]: ", file)?,
        }

        let mut message = String::new();
        ctx.format_fields(Writer::new(&mut message), event)?;
        writeln!(writer, "{}", message.trim_start())
    }
}
