//! Colorized one-line layout used by the terminal sink.
//!
//! Every severity shares the layout `[<LEVEL>] <module>: <message>` and differs only in
//! color and style. The styles live in a table built once per process.

use crate::severity::Severity;
use crate::utils::enable_ansi_support;
use colored::{Color, ColoredString, Colorize};
use std::fmt;
use std::sync::OnceLock;
use tracing::{Event, Subscriber};
use tracing_log::NormalizeEvent;
use tracing_subscriber::fmt::FmtContext;
use tracing_subscriber::fmt::format::{FormatEvent, FormatFields, Writer};
use tracing_subscriber::registry::LookupSpan;

/// Color and style attributes for one severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Template {
    pub color: Color,
    pub bold: bool,
    pub underline: bool,
}

impl Template {
    const fn new(color: Color, bold: bool, underline: bool) -> Self {
        Template {
            color,
            bold,
            underline,
        }
    }

    /// Style `text` with this template.
    pub fn paint(&self, text: &str) -> ColoredString {
        let mut styled = text.color(self.color);
        if self.bold {
            styled = styled.bold();
        }
        if self.underline {
            styled = styled.underline();
        }
        styled
    }
}

static TEMPLATES: OnceLock<[Template; 5]> = OnceLock::new();

/// The severity → template table, indexed by [`Severity::index`].
pub fn templates() -> &'static [Template; 5] {
    TEMPLATES.get_or_init(|| {
        [
            // DEBUG: light grey
            Template::new(Color::White, false, false),
            Template::new(Color::Blue, false, false),
            Template::new(Color::Yellow, true, false),
            Template::new(Color::Red, true, false),
            Template::new(Color::Red, true, true),
        ]
    })
}

/// Renders events as colored terminal lines.
#[derive(Debug, Clone, Copy)]
pub struct ColoredFormatter {
    templates: &'static [Template; 5],
}

impl ColoredFormatter {
    /// Create a formatter, preparing the console for ANSI output on first use.
    pub fn new() -> Self {
        enable_ansi_support();
        ColoredFormatter {
            templates: templates(),
        }
    }

    pub fn template(&self, severity: Severity) -> &Template {
        &self.templates[severity.index()]
    }
}

impl Default for ColoredFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl<S, N> FormatEvent<S, N> for ColoredFormatter
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
        let Some(severity) = Severity::of_event(event) else {
            return writeln!(
                writer,
                "Error log formatting, formatter for {} not found",
                event.metadata().level()
            );
        };

        let normalized = event.normalized_metadata();
        let metadata = normalized.as_ref().unwrap_or_else(|| event.metadata());

        let mut message = String::new();
        ctx.format_fields(Writer::new(&mut message), event)?;

        let line = format!(
            "[{}] {}: {}",
            severity.label(),
            metadata.module_path().unwrap_or_else(|| metadata.target()),
            message.trim_start()
        );
        writeln!(writer, "{}", self.template(severity).paint(&line))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::record_fields;
    use crate::test_support::SharedBuf;
    use crate::utils::terminal::ansi_support_enabled;
    use std::collections::HashSet;
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;

    fn render(emit: impl FnOnce()) -> Vec<String> {
        let buf = SharedBuf::default();
        let writer = buf.clone();
        let subscriber = tracing_subscriber::registry().with(
            fmt::layer()
                .fmt_fields(record_fields())
                .event_format(ColoredFormatter::new())
                .with_writer(move || writer.clone()),
        );
        tracing::subscriber::with_default(subscriber, emit);
        buf.lines()
    }

    #[test]
    fn each_severity_is_labelled_and_styled_distinctly() {
        colored::control::set_override(true);
        let lines = render(|| {
            tracing::debug!("job finished");
            tracing::info!("job finished");
            tracing::warn!("job finished");
            tracing::error!("job finished");
            crate::critical!("job finished");
        });

        assert_eq!(lines.len(), Severity::ALL.len());
        let module = module_path!();
        for (line, severity) in lines.iter().zip(Severity::ALL) {
            let plain = format!("[{}] {}: job finished", severity.label(), module);
            assert!(line.contains(&plain), "{line:?}");
            assert!(line.starts_with("\x1b["), "not styled: {line:?}");
        }
        assert_eq!(lines.iter().collect::<HashSet<_>>().len(), Severity::ALL.len());
    }

    #[test]
    fn extra_fields_follow_the_message() {
        colored::control::set_override(true);
        let lines = render(|| tracing::info!(attempt = 3, "retrying {}", "upload"));
        assert_eq!(lines.len(), 1);
        let expected = format!("[INFO] {}: retrying upload attempt=3", module_path!());
        assert!(lines[0].contains(&expected), "{lines:?}");
    }

    #[test]
    fn templates_match_the_palette() {
        let formatter = ColoredFormatter::new();
        assert_eq!(
            *formatter.template(Severity::Warning),
            Template::new(Color::Yellow, true, false)
        );
        assert_eq!(
            *formatter.template(Severity::Critical),
            Template::new(Color::Red, true, true)
        );
        assert_eq!(formatter.template(Severity::Info).color, Color::Blue);
    }

    #[test]
    fn unknown_severity_falls_back_to_a_diagnostic() {
        let lines = render(|| tracing::trace!("noise"));
        assert_eq!(lines, ["Error log formatting, formatter for TRACE not found"]);
    }

    #[test]
    fn construction_runs_the_console_fix_up() {
        let _formatter = ColoredFormatter::new();
        let _another = ColoredFormatter::default();
        assert!(ansi_support_enabled());
    }
}
