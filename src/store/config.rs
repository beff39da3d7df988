//! Store configuration
//!
//! Loaded from JSON or built in code. The logger callback is not part of
//! the file format; it defaults to structured JSON lines.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::errors::{StoreError, StoreResult};
use super::fault::FaultConfig;
use crate::observability::LogSink;

/// Largest digit width a `u64` block number can need
pub const MAX_BLOCK_DIGITS: usize = 16;

/// Configuration consumed by [`super::FileBlockStore`]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Directory standing in for the bucket
    pub root: PathBuf,

    /// Prepended to every block file name
    #[serde(default)]
    pub prefix: String,

    /// Block size in bytes (default: 4096)
    #[serde(default = "default_block_size")]
    pub block_size: usize,

    /// Minimum hex digits in a block file name (default: 8)
    #[serde(default = "default_block_digits")]
    pub block_digits: usize,

    #[serde(default)]
    pub fault: FaultConfig,

    #[serde(skip)]
    pub log: LogSink,
}

fn default_block_size() -> usize {
    4096
}

fn default_block_digits() -> usize {
    8
}

impl StoreConfig {
    /// Defaults rooted at `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            prefix: String::new(),
            block_size: default_block_size(),
            block_digits: default_block_digits(),
            fault: FaultConfig::default(),
            log: LogSink::default(),
        }
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    pub fn with_block_size(mut self, block_size: usize) -> Self {
        self.block_size = block_size;
        self
    }

    pub fn with_block_digits(mut self, block_digits: usize) -> Self {
        self.block_digits = block_digits;
        self
    }

    pub fn with_fault(mut self, fault: FaultConfig) -> Self {
        self.fault = fault;
        self
    }

    pub fn with_log(mut self, log: LogSink) -> Self {
        self.log = log;
        self
    }

    /// Read a JSON configuration file
    pub fn load(path: &Path) -> StoreResult<Self> {
        let contents = fs::read_to_string(path).map_err(|e| {
            StoreError::InvalidConfig(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_json(&contents)
    }

    pub fn from_json(json: &str) -> StoreResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| StoreError::InvalidConfig(format!("Failed to parse config: {}", e)))
    }

    /// Check every field; the root directory must already exist
    pub fn validate(&self) -> StoreResult<()> {
        if self.block_size == 0 {
            return Err(StoreError::InvalidConfig(
                "block_size must be greater than zero".to_string(),
            ));
        }
        if self.block_digits == 0 || self.block_digits > MAX_BLOCK_DIGITS {
            return Err(StoreError::InvalidConfig(format!(
                "block_digits must be within 1..={}, got {}",
                MAX_BLOCK_DIGITS, self.block_digits
            )));
        }
        self.fault.validate().map_err(StoreError::InvalidConfig)?;
        if !self.root.is_dir() {
            return Err(StoreError::InvalidConfig(format!(
                "root is not a directory: {}",
                self.root.display()
            )));
        }
        Ok(())
    }
}
