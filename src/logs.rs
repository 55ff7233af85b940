//! Logging and debug utilities.
//!
//! Debug output goes to stderr, and only when the `DEBUG` environment
//! variable is set.

use std::env;

/// Print debug messages to stderr if DEBUG environment variable is set.
///
/// # Examples
///
/// ```
/// # use matchstyle::logs::debug;
/// debug("Background parsed");
/// debug(&format!("contrast={}", 4.5));
/// ```
pub fn debug(message: &str) {
    if enabled() {
        eprintln!("{message}");
    }
}

/// Whether debug output is turned on.
#[must_use]
pub fn enabled() -> bool {
    env::var_os("DEBUG").is_some()
}

/// Format a message and hand it to [`debug`].
///
/// Formatting is skipped entirely when debug output is off.
#[macro_export]
macro_rules! debug {
    ($($arg:tt)*) => {
        if $crate::logs::enabled() {
            $crate::logs::debug(&format!($($arg)*));
        }
    };
}
