//! End-to-end tests: configure, install, log, and read back what each sink received.

use colored::Colorize;
use sane_logging::{
    Handler, HandlerKind, Logger, LoggingSettings, SaneLogging, Severity, critical,
};
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

#[derive(Clone, Default)]
struct SharedBuf(Arc<Mutex<Vec<u8>>>);

impl SharedBuf {
    fn contents(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }

    /// A `MakeWriter` handing out clones of this buffer.
    fn make_writer(&self) -> impl Fn() -> SharedBuf + Send + Sync + 'static {
        let buf = self.clone();
        move || buf.clone()
    }
}

impl Write for SharedBuf {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn log_file(logger: &Logger) -> PathBuf {
    logger
        .handlers()
        .iter()
        .find_map(|handler| match handler.kind() {
            HandlerKind::File(path) => Some(path.clone()),
            _ => None,
        })
        .expect("a file handler")
}

#[test]
fn warning_terminal_and_debug_file() {
    colored::control::set_override(true);
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("previous.log"), "stale").unwrap();
    let terminal_out = SharedBuf::default();

    let mut logger = Logger::new("e2e");
    let mut config = SaneLogging::new();
    config
        .terminal("WARNING")
        .file(dir.path(), "DEBUG", true);
    config
        .apply_with_writer(&mut logger, terminal_out.make_writer())
        .unwrap();

    assert!(!dir.path().join("previous.log").exists());
    let path = log_file(&logger);
    let terminal = &logger.handlers()[0];
    assert_eq!(terminal.kind(), &HandlerKind::Terminal);
    assert_eq!(terminal.level(), Severity::Warning);

    tracing::subscriber::with_default(logger.into_subscriber(), || {
        tracing::debug!("debug message");
        tracing::warn!("warning message");
    });

    // terminal: only the warning, bold yellow
    assert_eq!(
        terminal_out.contents(),
        format!(
            "{}\n",
            "[WARNING] end_to_end: warning message".yellow().bold()
        )
    );

    // file: both records, plain layout
    let contents = fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines.len(), 2, "{contents}");
    assert!(lines[0].starts_with('['));
    assert!(lines[0].contains("][DEBUG][end_to_end.rs:"), "{}", lines[0]);
    assert!(lines[0].ends_with("]: debug message"));
    assert!(lines[1].contains("][WARNING][end_to_end.rs:"), "{}", lines[1]);
    assert!(lines[1].ends_with("]: warning message"));
    assert!(!contents.contains('\x1b'));
}

#[test]
fn terminal_layout_only_shows_records_above_threshold() {
    colored::control::set_override(true);
    let out = SharedBuf::default();
    let mut logger = Logger::new("e2e");
    logger.add_handler(Handler::colored(Severity::Warning, out.make_writer()));

    tracing::subscriber::with_default(logger.into_subscriber(), || {
        tracing::debug!("debug message");
        tracing::info!("info message");
        tracing::warn!("warning message");
        tracing::error!(critical = false, "error message");
        critical!("critical message");
    });

    let expected = format!(
        "{}\n{}\n{}\n",
        "[WARNING] end_to_end: warning message".yellow().bold(),
        "[ERROR] end_to_end: error message".red().bold(),
        "[CRITICAL] end_to_end: critical message"
            .red()
            .bold()
            .underline(),
    );
    assert_eq!(out.contents(), expected);
}

#[test]
fn records_from_the_log_crate_reach_the_file() {
    tracing_log::LogTracer::init().unwrap();
    let dir = TempDir::new().unwrap();

    let mut logger = Logger::new("e2e");
    let mut config = SaneLogging::new();
    config.file(dir.path(), Severity::Info, false);
    config.apply(&mut logger).unwrap();
    let path = log_file(&logger);

    tracing::subscriber::with_default(logger.into_subscriber(), || {
        log::debug!("filtered out");
        log::error!("bridged error");
    });

    let contents = fs::read_to_string(&path).unwrap();
    assert_eq!(contents.lines().count(), 1, "{contents}");
    assert!(contents.contains("][ERROR][end_to_end.rs:"), "{contents}");
    assert!(contents.trim_end().ends_with("]: bridged error"));
}

#[test]
fn settings_file_drives_the_same_setup() {
    let dir = TempDir::new().unwrap();
    let logs = dir.path().join("logs");
    let settings_path = dir.path().join("logging.json");
    fs::write(
        &settings_path,
        format!(
            r#"{{ "file": {{ "directory": {}, "level": "ERROR" }} }}"#,
            serde_json::to_string(&logs).unwrap()
        ),
    )
    .unwrap();

    let settings = LoggingSettings::load(&settings_path).unwrap();
    let mut logger = Logger::new("e2e");
    settings.into_builder().apply(&mut logger).unwrap();
    let path = log_file(&logger);

    tracing::subscriber::with_default(logger.into_subscriber(), || {
        tracing::warn!("below threshold");
        tracing::error!(code = 7, "above threshold");
        critical!("way above threshold");
    });

    let contents = fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines.len(), 2, "{contents}");
    assert!(lines[0].ends_with("]: above threshold code=7"));
    assert!(lines[1].contains("][CRITICAL]["));
}
