//! Filesystem-backed mock block store
//!
//! Emulates an object store holding one object per block. Each non-zero
//! block is a regular file under the configured root; an absent file is
//! an all-zero block.
//!
//! # Guarantees
//!
//! - Reads never observe a partially written block (temp file + rename)
//! - Writing an all-zero block deletes its file
//! - Reading a never-written block returns zeros, not an error
//! - Short files and digest mismatches are reported, never repaired
//!
//! No locking is done. Concurrent calls on the same block race, and
//! either the old or the new content is a valid outcome.

mod address;
mod config;
mod digest;
mod errors;
mod fault;
mod local;
mod reader;
mod writer;

use std::fmt;

pub use address::{block_name, path_for};
pub use config::{StoreConfig, MAX_BLOCK_DIGITS};
pub use digest::{BlockDigest, DIGEST_LEN};
pub use errors::{StoreError, StoreResult};
pub use fault::{BlockOp, FailFirst, FaultConfig, FaultInjector, NoFaults, RandomFaults};
pub use local::FileBlockStore;

/// Fixed-size block storage contract
///
/// Buffers are always exactly [`BlockStore::block_size`] bytes.
pub trait BlockStore: Send + Sync + fmt::Debug {
    /// Size of every block in bytes
    fn block_size(&self) -> usize;

    /// Fill `dest` with the content of `block_num`
    ///
    /// A block that was never written (or was written as zeros) reads back
    /// as zeros. When `expected` is given the content is checked against it;
    /// on mismatch `dest` still holds what was read.
    fn read_block(
        &self,
        block_num: u64,
        dest: &mut [u8],
        expected: Option<&BlockDigest>,
    ) -> StoreResult<()>;

    /// Replace the content of `block_num`
    ///
    /// `None` or an all-zero buffer removes the block.
    fn write_block(&self, block_num: u64, src: Option<&[u8]>) -> StoreResult<()>;
}
