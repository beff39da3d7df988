//! Observability for the block store
//!
//! - Structured JSON logging through a pluggable callback
//! - Lock-free operation counters
//!
//! Observability is read-only: nothing here changes what a store call
//! returns.
//!
//! # Usage
//!
//! ```ignore
//! use mockblock::observability::{LogSink, Severity};
//!
//! let (sink, capture) = LogSink::memory();
//! sink.log(Severity::Info, "write 00000001 started");
//! assert!(capture.contains("started"));
//! ```

mod logger;
mod metrics;
mod sink;

pub use logger::{Logger, Severity};
pub use metrics::{StatsSnapshot, StoreStats};
pub use sink::{LogCapture, LogSink};
