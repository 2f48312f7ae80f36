//! Module for the logger that sinks are attached to.
//!
//! A [`Logger`] is an ordered list of [`Handler`]s. Every handler is a
//! `tracing_subscriber::fmt` layer with its own formatter, writer and
//! [`SeverityFilter`], so installing the logger stacks those layers on one registry.
//!
//! # Details
//! Handlers are only ever appended. The logger is consumed when it is installed, so
//! the handler list is fixed for the lifetime of the subscriber.

use crate::error::{Result, SaneLoggingError};
use crate::filter::SeverityFilter;
use crate::format::{ColoredFormatter, PlainFormatter, record_fields};
use crate::severity::Severity;
use std::fmt;
use std::fs::OpenOptions;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::{Layer, Layered};
use tracing_subscriber::prelude::*;
use tracing_subscriber::registry::Registry;

/// A sink layer as stored on a [`Logger`].
pub type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Where a handler writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandlerKind {
    /// Colored terminal output.
    Terminal,
    /// A log file at the given path.
    File(PathBuf),
    /// Plain layout to a caller-provided writer.
    Custom,
}

/// One attached sink: a threshold and the layer that renders and writes records.
pub struct Handler {
    kind: HandlerKind,
    level: Severity,
    layer: BoxedLayer,
}

impl Handler {
    /// Colored output to standard output.
    pub fn terminal(level: Severity) -> Self {
        Self::colored(level, io::stdout)
    }

    /// Colored output to any writer.
    ///
    /// # Arguments
    ///
    /// * `level` - Minimum severity written.
    /// * `make_writer` - Where the lines go, for example `io::stdout` or `io::stderr`.
    pub fn colored<W>(level: Severity, make_writer: W) -> Self
    where
        W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
    {
        let layer = tracing_subscriber::fmt::layer()
            .fmt_fields(record_fields())
            .event_format(ColoredFormatter::new())
            .with_writer(make_writer)
            .with_filter(SeverityFilter::new(level))
            .boxed();

        Handler {
            kind: HandlerKind::Terminal,
            level,
            layer,
        }
    }

    /// Plain-text output appended to the file at `path`.
    ///
    /// # Arguments
    ///
    /// * `path` - Log file, created if missing. Its directory must already exist.
    /// * `level` - Minimum severity written.
    ///
    /// # Returns
    ///
    /// * `Result<Self>` - The handler, or [`SaneLoggingError::Io`] if the file cannot
    ///   be opened.
    pub fn file(path: &Path, level: Severity) -> Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| SaneLoggingError::io(path, e))?;

        let mut handler = Self::plain(level, Mutex::new(file));
        handler.kind = HandlerKind::File(path.to_path_buf());
        Ok(handler)
    }

    /// Plain-text output to any writer.
    pub fn plain<W>(level: Severity, make_writer: W) -> Self
    where
        W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
    {
        let layer = tracing_subscriber::fmt::layer()
            .fmt_fields(record_fields())
            .event_format(PlainFormatter::new())
            .with_writer(make_writer)
            .with_ansi(false)
            .with_filter(SeverityFilter::new(level))
            .boxed();

        Handler {
            kind: HandlerKind::Custom,
            level,
            layer,
        }
    }

    pub fn kind(&self) -> &HandlerKind {
        &self.kind
    }

    /// Minimum severity this handler lets through.
    pub fn level(&self) -> Severity {
        self.level
    }

    pub fn into_layer(self) -> BoxedLayer {
        self.layer
    }
}

impl fmt::Debug for Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Handler")
            .field("kind", &self.kind)
            .field("level", &self.level)
            .finish_non_exhaustive()
    }
}

/// A named, ordered list of handlers.
#[derive(Debug)]
pub struct Logger {
    name: String,
    handlers: Vec<Handler>,
}

impl Logger {
    pub fn new(name: impl Into<String>) -> Self {
        Logger {
            name: name.into(),
            handlers: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn handlers(&self) -> &[Handler] {
        &self.handlers
    }

    /// Append a handler after the existing ones.
    pub fn add_handler(&mut self, handler: Handler) {
        self.handlers.push(handler);
    }

    /// Stack every handler's layer on a fresh registry without installing it.
    pub fn into_subscriber(self) -> Layered<Vec<BoxedLayer>, Registry> {
        let layers: Vec<BoxedLayer> = self.handlers.into_iter().map(Handler::into_layer).collect();
        tracing_subscriber::registry().with(layers)
    }

    /// Install this logger as the global default subscriber.
    ///
    /// Records from the `log` crate are bridged in as well.
    ///
    /// # Returns
    ///
    /// * `Result<()>` - [`SaneLoggingError::Init`] if a global subscriber or `log`
    ///   logger is already set.
    pub fn init(self) -> Result<()> {
        self.into_subscriber()
            .try_init()
            .map_err(|e| SaneLoggingError::Init(e.to_string()))
    }
}
