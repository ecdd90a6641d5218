#![deny(missing_docs)]
//! Shared logging utilities for the portal workspace.
//!
//! This crate provides the `portal_*` logging macros used across the codebase,
//! a helper for keeping response bodies short in log lines, and a minimal test
//! initializer for the global logger.

/// Maximum number of characters of a remote payload echoed into a log line.
pub const LOG_EXCERPT_LIMIT: usize = 160;

/// Logs a trace-level message using the global logging facade.
#[macro_export]
macro_rules! portal_trace {
    ($($arg:tt)*) => {{
        log::trace!($($arg)*);
    }};
}

/// Logs an info-level message using the global logging facade.
#[macro_export]
macro_rules! portal_info {
    ($($arg:tt)*) => {{
        log::info!($($arg)*);
    }};
}

/// Logs a debug-level message using the global logging facade.
#[macro_export]
macro_rules! portal_debug {
    ($($arg:tt)*) => {{
        log::debug!($($arg)*);
    }};
}

/// Logs a warn-level message using the global logging facade.
#[macro_export]
macro_rules! portal_warn {
    ($($arg:tt)*) => {{
        log::warn!($($arg)*);
    }};
}

/// Logs an error-level message using the global logging facade.
#[macro_export]
macro_rules! portal_error {
    ($($arg:tt)*) => {{
        log::error!($($arg)*);
    }};
}

/// Returns at most [`LOG_EXCERPT_LIMIT`] characters of `text`, single-lined.
///
/// Server error bodies can be whole HTML pages; only the head is useful in a log.
pub fn excerpt(text: &str) -> String {
    let single_line: String = text
        .chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect();
    let trimmed = single_line.trim();
    if trimmed.chars().count() <= LOG_EXCERPT_LIMIT {
        return trimmed.to_string();
    }
    let head: String = trimmed.chars().take(LOG_EXCERPT_LIMIT).collect();
    format!("{head}…")
}

/// Initializes a simple terminal logger for use in unit tests.
///
/// This safely no-ops if another logger has already been initialized.
pub fn initialize_for_tests() {
    use simplelog::{ColorChoice, CombinedLogger, Config, TermLogger, TerminalMode};

    // Use debug level in debug builds, info in release builds.
    let level = if cfg!(debug_assertions) {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    // Ignore the error if a logger was already set by another test.
    let _ = CombinedLogger::init(vec![TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )]);
}

#[cfg(test)]
mod tests {
    use super::{excerpt, LOG_EXCERPT_LIMIT};

    #[test]
    fn short_text_is_kept() {
        assert_eq!(excerpt("  not found \n"), "not found");
    }

    #[test]
    fn long_text_is_cut_with_marker() {
        let body = "x".repeat(LOG_EXCERPT_LIMIT + 40);
        let cut = excerpt(&body);
        assert!(cut.ends_with('…'));
        assert_eq!(cut.chars().count(), LOG_EXCERPT_LIMIT + 1);
    }

    #[test]
    fn newlines_are_flattened() {
        assert_eq!(excerpt("a\nb\tc"), "a b c");
    }
}
