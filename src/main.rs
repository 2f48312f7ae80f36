//! Main entry point for the sane-logging demo.
//!
//! Parses the command line, attaches the requested sinks to a logger, installs it and
//! emits one sample record per severity so each sink's filtering and layout can be seen.

mod cli;

use clap::Parser;
use cli::Cli;
use sane_logging::{Logger, Result, critical};
use tracing::{debug, error, info, warn};

/// Entry point of the application.
fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Configures logging from the parsed arguments and emits the sample records.
///
/// # Arguments
///
/// * `cli` - A struct containing the parsed command line arguments.
///
/// # Returns
///
/// * `Result<()>` - Returns Ok on success, or an error on failure.
fn run(cli: Cli) -> Result<()> {
    let settings = cli.settings()?;
    let file_directory = settings.file.as_ref().map(|file| file.directory.clone());

    let mut logger = Logger::new(env!("CARGO_PKG_NAME"));
    settings.into_builder().apply(&mut logger)?;
    logger.init()?;

    debug!("{}", cli.message);
    info!("{}", cli.message);
    warn!("{}", cli.message);
    error!("{}", cli.message);
    critical!("{}", cli.message);
    log::info!("{} (via the log crate)", cli.message);

    if let Some(directory) = file_directory {
        info!(directory = %directory.display(), "log file written");
    }

    Ok(())
}
