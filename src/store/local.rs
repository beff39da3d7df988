//! Store lifecycle and shared plumbing for the read and write paths

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use std::thread;

use super::address;
use super::config::StoreConfig;
use super::digest::BlockDigest;
use super::errors::{StoreError, StoreResult};
use super::fault::{BlockOp, FaultInjector, RandomFaults};
use super::BlockStore;
use crate::observability::{Severity, StatsSnapshot, StoreStats};

/// Block store rooted in a local directory
pub struct FileBlockStore {
    pub(super) config: Arc<StoreConfig>,
    /// All zeros, one block long; compared against on every write
    pub(super) zero_block: Box<[u8]>,
    pub(super) faults: Box<dyn FaultInjector>,
    pub(super) stats: StoreStats,
}

impl FileBlockStore {
    /// Create a store whose faults follow `config.fault`
    pub fn create(config: impl Into<Arc<StoreConfig>>) -> StoreResult<Self> {
        let config = config.into();
        let faults = RandomFaults::from_config(&config.fault);
        Self::with_faults(config, Box::new(faults))
    }

    /// Create a store with an explicit fault injection strategy
    pub fn with_faults(
        config: impl Into<Arc<StoreConfig>>,
        faults: Box<dyn FaultInjector>,
    ) -> StoreResult<Self> {
        let config = config.into();
        config.validate()?;
        let zero_block = alloc_zero_block(config.block_size)?;

        Ok(Self {
            config,
            zero_block,
            faults,
            stats: StoreStats::new(),
        })
    }

    /// Release the store
    ///
    /// Equivalent to dropping it. The caller must ensure no operation is
    /// still running.
    pub fn destroy(self) {
        drop(self);
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Path of the file backing `block_num`
    pub fn path_for(&self, block_num: u64) -> PathBuf {
        address::path_for(&self.config, block_num)
    }

    pub fn stats(&self) -> StatsSnapshot {
        self.stats.snapshot()
    }

    #[inline]
    pub(super) fn log(&self, severity: Severity, message: &str) {
        self.config.log.log(severity, message);
    }

    pub(super) fn check_buffer(&self, len: usize) -> StoreResult<()> {
        if len != self.config.block_size {
            self.log(
                Severity::Error,
                &format!(
                    "buffer is {} bytes, block size is {}",
                    len, self.config.block_size
                ),
            );
            return Err(StoreError::BufferSize {
                expected: self.config.block_size,
                actual: len,
            });
        }
        Ok(())
    }

    /// Sleep for the injected delay, then maybe fail
    pub(super) fn inject_faults(&self, op: BlockOp, name: &str) -> StoreResult<()> {
        let delay = self.faults.delay(op);
        if !delay.is_zero() {
            thread::sleep(delay);
        }

        if self.faults.should_fail(op) {
            self.stats.increment_injected_faults();
            let verb = match op {
                BlockOp::Read => "reading",
                BlockOp::Write | BlockOp::Delete => "writing",
            };
            self.log(
                Severity::Error,
                &format!("random failure {} {}", verb, name),
            );
            return Err(StoreError::Transient);
        }
        Ok(())
    }
}

fn alloc_zero_block(size: usize) -> StoreResult<Box<[u8]>> {
    let mut buf = Vec::new();
    buf.try_reserve_exact(size)
        .map_err(|_| StoreError::OutOfMemory(size))?;
    buf.resize(size, 0u8);
    Ok(buf.into_boxed_slice())
}

impl fmt::Debug for FileBlockStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileBlockStore")
            .field("root", &self.config.root)
            .field("prefix", &self.config.prefix)
            .field("block_size", &self.config.block_size)
            .field("faults", &self.faults)
            .finish()
    }
}

impl BlockStore for FileBlockStore {
    fn block_size(&self) -> usize {
        self.config.block_size
    }

    fn read_block(
        &self,
        block_num: u64,
        dest: &mut [u8],
        expected: Option<&BlockDigest>,
    ) -> StoreResult<()> {
        self.read_block_file(block_num, dest, expected)
    }

    fn write_block(&self, block_num: u64, src: Option<&[u8]>) -> StoreResult<()> {
        self.write_block_file(block_num, src)
    }
}
