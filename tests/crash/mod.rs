//! Crash testing framework
//!
//! - Crash injection at deterministic points via `MOCKBLOCK_CRASH_POINT`
//! - Subprocess management
//! - Post-crash validation

pub mod harness;
pub mod scenarios;
pub mod utils;

pub use harness::*;
pub use utils::*;
