#![deny(missing_docs)]
//! Shared logging utilities for the upload workspace.
//!
//! This crate provides the `upload_*` logging macros used by the controller,
//! the engine and the terminal front end, a per-thread "current attempt"
//! context that tags log lines with the submission they belong to, and a
//! minimal test initializer for the global logger.

use std::cell::Cell;

thread_local! {
    /// Submission attempt the current thread is working on, 0 when none.
    static CURRENT_ATTEMPT: Cell<u64> = const { Cell::new(0) };
}

/// Records the submission attempt handled by the current thread.
///
/// Only the dispatch loop calls this, before applying a message that belongs
/// to an attempt. Async tasks hop between worker threads, so engine code
/// passes the attempt to the macros with `attempt = id;` instead.
pub fn set_attempt(attempt: u64) {
    CURRENT_ATTEMPT.with(|v| v.set(attempt));
}

/// Returns the submission attempt recorded for the current thread.
/// Returns 0 if no attempt has been recorded.
pub fn current_attempt() -> u64 {
    CURRENT_ATTEMPT.with(|v| v.get())
}

/// Logs a trace-level message prefixed with the current attempt, or with an
/// explicit one: `upload_trace!(attempt = id; "...")`.
#[macro_export]
macro_rules! upload_trace {
    (attempt = $attempt:expr; $($arg:tt)*) => {{
        log::trace!("[attempt {}] {}", $attempt, format_args!($($arg)*));
    }};
    ($($arg:tt)*) => {{
        log::trace!("[attempt {}] {}", $crate::current_attempt(), format_args!($($arg)*));
    }};
}

/// Logs a debug-level message prefixed with the current attempt.
#[macro_export]
macro_rules! upload_debug {
    (attempt = $attempt:expr; $($arg:tt)*) => {{
        log::debug!("[attempt {}] {}", $attempt, format_args!($($arg)*));
    }};
    ($($arg:tt)*) => {{
        log::debug!("[attempt {}] {}", $crate::current_attempt(), format_args!($($arg)*));
    }};
}

/// Logs an info-level message prefixed with the current attempt.
#[macro_export]
macro_rules! upload_info {
    (attempt = $attempt:expr; $($arg:tt)*) => {{
        log::info!("[attempt {}] {}", $attempt, format_args!($($arg)*));
    }};
    ($($arg:tt)*) => {{
        log::info!("[attempt {}] {}", $crate::current_attempt(), format_args!($($arg)*));
    }};
}

/// Logs a warn-level message prefixed with the current attempt.
#[macro_export]
macro_rules! upload_warn {
    (attempt = $attempt:expr; $($arg:tt)*) => {{
        log::warn!("[attempt {}] {}", $attempt, format_args!($($arg)*));
    }};
    ($($arg:tt)*) => {{
        log::warn!("[attempt {}] {}", $crate::current_attempt(), format_args!($($arg)*));
    }};
}

/// Logs an error-level message prefixed with the current attempt.
#[macro_export]
macro_rules! upload_error {
    (attempt = $attempt:expr; $($arg:tt)*) => {{
        log::error!("[attempt {}] {}", $attempt, format_args!($($arg)*));
    }};
    ($($arg:tt)*) => {{
        log::error!("[attempt {}] {}", $crate::current_attempt(), format_args!($($arg)*));
    }};
}

/// Initializes a terminal logger for use in tests.
///
/// Safe to call from every test: a second initialization is ignored.
pub fn initialize_for_tests() {
    use simplelog::{ColorChoice, CombinedLogger, Config, TermLogger, TerminalMode};

    let level = if cfg!(debug_assertions) {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    let _ = CombinedLogger::init(vec![TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )]);
}
