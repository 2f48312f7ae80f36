//! Event formatters for the two sinks.
//!
//! Both implement [`FormatEvent`](tracing_subscriber::fmt::FormatEvent) and render one
//! line per event. The message and any extra fields come from [`record_fields`].

pub mod colored;
pub mod plain;

pub use self::colored::ColoredFormatter;
pub use self::plain::PlainFormatter;

use crate::severity::CRITICAL_FIELD;
use std::fmt;
use tracing::field::Field;
use tracing_subscriber::fmt::format::{FieldFn, Writer, debug_fn};

/// Field formatter shared by the sinks.
pub type RecordFields = FieldFn<fn(&mut Writer<'_>, &Field, &dyn fmt::Debug) -> fmt::Result>;

/// Writes the message followed by ` name=value` for every other field.
///
/// The `critical` marker and the `log.*` fields added by the `log` bridge are left out.
pub fn record_fields() -> RecordFields {
    debug_fn(write_field as fn(&mut Writer<'_>, &Field, &dyn fmt::Debug) -> fmt::Result)
}

fn write_field(writer: &mut Writer<'_>, field: &Field, value: &dyn fmt::Debug) -> fmt::Result {
    match field.name() {
        "message" => write!(writer, "{:?}", value),
        name if name == CRITICAL_FIELD || name.starts_with("log.") => Ok(()),
        name => write!(writer, " {}={:?}", name, value),
    }
}
