//! Crash point injection for interruption testing
//!
//! When the `MOCKBLOCK_CRASH_POINT` environment variable names a point that
//! the write path reaches, the process terminates immediately via
//! `std::process::abort()`. No cleanup runs, so the on-disk state is exactly
//! what a power loss at that instant would leave behind.
//!
//! # Usage
//!
//! ```ignore
//! use mockblock::crash_point::{maybe_crash, points};
//!
//! maybe_crash(points::BLOCK_WRITE_BEFORE_RENAME);
//! ```
//!
//! ```bash
//! MOCKBLOCK_CRASH_POINT=block_write_before_rename mockblock write ...
//! ```

use std::sync::OnceLock;

/// Environment variable naming the active crash point
pub const CRASH_POINT_ENV: &str = "MOCKBLOCK_CRASH_POINT";

static CRASH_POINT: OnceLock<Option<String>> = OnceLock::new();

#[inline]
fn get_crash_point() -> Option<&'static str> {
    CRASH_POINT
        .get_or_init(|| std::env::var(CRASH_POINT_ENV).ok())
        .as_deref()
}

/// Check if a specific crash point is enabled
#[inline]
pub fn crash_point_enabled(name: &str) -> bool {
    get_crash_point().map(|p| p == name).unwrap_or(false)
}

/// Abort the process if the named crash point is enabled
///
/// No-op when `MOCKBLOCK_CRASH_POINT` is unset or names another point.
#[inline]
pub fn maybe_crash(name: &str) {
    if crash_point_enabled(name) {
        eprintln!("[CRASH] Triggering crash at point: {}", name);
        std::process::abort();
    }
}

/// All defined crash point names
pub mod points {
    /// Temporary file written and synced but still open, target untouched
    pub const BLOCK_WRITE_AFTER_TEMP_SYNC: &str = "block_write_after_temp_sync";
    /// Temporary file closed, about to be renamed onto the target
    pub const BLOCK_WRITE_BEFORE_RENAME: &str = "block_write_before_rename";
    /// Rename done, parent directory not yet synced
    pub const BLOCK_WRITE_AFTER_RENAME: &str = "block_write_after_rename";
    /// Zero-block write about to unlink the target
    pub const BLOCK_DELETE_BEFORE_UNLINK: &str = "block_delete_before_unlink";

    /// Get all crash point names
    pub fn all() -> &'static [&'static str] {
        &[
            BLOCK_WRITE_AFTER_TEMP_SYNC,
            BLOCK_WRITE_BEFORE_RENAME,
            BLOCK_WRITE_AFTER_RENAME,
            BLOCK_DELETE_BEFORE_UNLINK,
        ]
    }
}
