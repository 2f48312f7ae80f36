//! Module for preparing the terminal for colored output.
//!
//! Legacy Windows consoles interpret ANSI escape sequences only once virtual terminal
//! processing is switched on. Every other platform needs nothing.

use std::sync::Once;

static ANSI_SUPPORT: Once = Once::new();

/// Make ANSI escape sequences render on the current console.
///
/// Safe to call any number of times; the fix-up runs at most once per process.
pub fn enable_ansi_support() {
    ANSI_SUPPORT.call_once(|| {
        #[cfg(windows)]
        if colored::control::set_virtual_terminal(true).is_err() {
            eprintln!("Failed to enable virtual terminal processing, colors may not render");
        }
    });
}

/// Whether the one-time fix-up has already run.
#[cfg(test)]
pub(crate) fn ansi_support_enabled() -> bool {
    ANSI_SUPPORT.is_completed()
}
