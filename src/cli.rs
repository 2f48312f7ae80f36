use clap::Parser;
use sane_logging::{
    DEFAULT_TERMINAL_LEVEL, FileSink, LoggingSettings, Result, Severity, TerminalSink,
};
use std::path::PathBuf;

/// Configure terminal and file log sinks, then emit one record per severity
#[derive(Debug, Parser)]
#[clap(name = "sane-logging", about = "Try out terminal and file log sinks", version, author)]
pub struct Cli {
    /// Verbose terminal output (lowers the terminal threshold to DEBUG)
    #[clap(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Terminal threshold: DEBUG, INFO, WARNING, ERROR or CRITICAL
    #[clap(long)]
    pub terminal: Option<Severity>,

    /// Directory that receives a new timestamped log file
    #[clap(long)]
    pub file: Option<PathBuf>,

    /// File threshold
    #[clap(long, default_value = "DEBUG")]
    pub file_level: Severity,

    /// Remove old entries from the log directory first
    #[clap(long, requires = "file")]
    pub clean: bool,

    /// JSON settings file to read instead of the flags above
    #[clap(long, conflicts_with_all = ["terminal", "file"])]
    pub config: Option<PathBuf>,

    /// Text of the sample records
    #[clap(long, default_value = "hello from sane-logging")]
    pub message: String,
}

impl Cli {
    /// Resolve the sinks to attach.
    ///
    /// An explicit settings file wins. Without any sink flag the default settings file
    /// is used if present, and a terminal sink otherwise.
    pub fn settings(&self) -> Result<LoggingSettings> {
        if let Some(path) = &self.config {
            return LoggingSettings::load(path);
        }

        let mut settings = LoggingSettings {
            terminal: self.terminal.map(|level| TerminalSink { level }),
            file: self.file.clone().map(|directory| FileSink {
                directory,
                level: self.file_level,
                clean: self.clean,
            }),
        };

        if settings.is_empty() {
            settings = LoggingSettings::load_default()?;
        }
        if settings.is_empty() {
            settings.terminal = Some(TerminalSink {
                level: DEFAULT_TERMINAL_LEVEL,
            });
        }
        if self.verbose > 0 {
            settings.terminal = Some(TerminalSink {
                level: Severity::Debug,
            });
        }

        Ok(settings)
    }
}
