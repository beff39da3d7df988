//! Per-store operation counters
//!
//! - Counters only, monotonic
//! - Reset only when the store is created
//! - Thread-safe, lock-free

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

/// Counters for one store instance
///
/// Relaxed ordering throughout; the values are observational and never
/// drive control flow.
#[derive(Debug, Default)]
pub struct StoreStats {
    reads: AtomicU64,
    zero_reads: AtomicU64,
    writes: AtomicU64,
    deletes: AtomicU64,
    injected_faults: AtomicU64,
    corruptions: AtomicU64,
    io_errors: AtomicU64,
}

impl StoreStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Completed read, including zero reads
    pub fn increment_reads(&self) {
        self.reads.fetch_add(1, Ordering::Relaxed);
    }

    /// Read of an absent block
    pub fn increment_zero_reads(&self) {
        self.zero_reads.fetch_add(1, Ordering::Relaxed);
    }

    /// Completed non-zero write
    pub fn increment_writes(&self) {
        self.writes.fetch_add(1, Ordering::Relaxed);
    }

    /// Completed zero-block write (file removed or already absent)
    pub fn increment_deletes(&self) {
        self.deletes.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_injected_faults(&self) {
        self.injected_faults.fetch_add(1, Ordering::Relaxed);
    }

    /// Truncated block or digest mismatch
    pub fn increment_corruptions(&self) {
        self.corruptions.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_io_errors(&self) {
        self.io_errors.fetch_add(1, Ordering::Relaxed);
    }

    /// Point-in-time copy of every counter
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            reads: self.reads.load(Ordering::Relaxed),
            zero_reads: self.zero_reads.load(Ordering::Relaxed),
            writes: self.writes.load(Ordering::Relaxed),
            deletes: self.deletes.load(Ordering::Relaxed),
            injected_faults: self.injected_faults.load(Ordering::Relaxed),
            corruptions: self.corruptions.load(Ordering::Relaxed),
            io_errors: self.io_errors.load(Ordering::Relaxed),
        }
    }
}

/// Plain copy of [`StoreStats`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatsSnapshot {
    pub reads: u64,
    pub zero_reads: u64,
    pub writes: u64,
    pub deletes: u64,
    pub injected_faults: u64,
    pub corruptions: u64,
    pub io_errors: u64,
}
