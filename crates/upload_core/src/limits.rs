//! Fixed client-side limits, progress milestones and display delays.
use std::time::Duration;

/// Extensions accepted by the picker, compared case-insensitively.
pub const ALLOWED_EXTENSIONS: [&str; 3] = ["ppt", "pptx", "pdf"];

/// Largest accepted file, inclusive.
pub const MAX_FILE_BYTES: u64 = 20 * 1024 * 1024;

/// Progress shown before the request is sent.
pub const PROGRESS_SENDING: u8 = 10;
/// Progress once the response status has been accepted.
pub const PROGRESS_RESPONSE: u8 = 50;
/// Progress once the response body has been parsed.
pub const PROGRESS_PARSED: u8 = 80;
pub const PROGRESS_COMPLETE: u8 = 100;

/// Pause between "body parsed" and "complete".
pub const FINALIZE_DELAY: Duration = Duration::from_millis(800);
/// Pause between "complete" and revealing the result area.
pub const REVEAL_DELAY: Duration = Duration::from_millis(500);
/// Lifetime of the error banner.
pub const ERROR_BANNER_TIMEOUT: Duration = Duration::from_secs(5);
