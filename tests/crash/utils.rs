//! Crash testing utilities
//!
//! - Scratch store directories with a config file
//! - Post-crash inspection through a fresh in-process store

use std::fs;
use std::path::{Path, PathBuf};

use mockblock::observability::LogSink;
use mockblock::store::{BlockStore, FileBlockStore, NoFaults, StoreConfig};
use tempfile::TempDir;

pub const BLOCK_SIZE: usize = 4096;
pub const PREFIX: &str = "blk";
pub const DIGITS: usize = 5;

/// A bucket directory plus the config file pointing at it
pub struct StoreDir {
    temp: TempDir,
    bucket: PathBuf,
}

impl StoreDir {
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp dir");
        let bucket = temp.path().join("bucket");
        fs::create_dir_all(&bucket).expect("Failed to create bucket dir");

        let config = serde_json::json!({
            "root": bucket,
            "prefix": PREFIX,
            "block_size": BLOCK_SIZE,
            "block_digits": DIGITS,
            "fault": { "max_delay_ms": 0, "failure_rate": 0.0 }
        });
        fs::write(
            temp.path().join("mockblock.json"),
            serde_json::to_string_pretty(&config).unwrap(),
        )
        .expect("Failed to write config");

        Self { temp, bucket }
    }

    pub fn config_path(&self) -> PathBuf {
        self.temp.path().join("mockblock.json")
    }

    pub fn bucket(&self) -> &Path {
        &self.bucket
    }

    /// Fresh store over the same directory, as a restarted process would see it
    pub fn open_store(&self) -> FileBlockStore {
        let config = StoreConfig::new(&self.bucket)
            .with_prefix(PREFIX)
            .with_block_size(BLOCK_SIZE)
            .with_block_digits(DIGITS)
            .with_log(LogSink::discard());
        FileBlockStore::with_faults(config, Box::new(NoFaults)).expect("Failed to open store")
    }

    pub fn read_block(&self, block: u64) -> Vec<u8> {
        let store = self.open_store();
        let mut buf = vec![0u8; BLOCK_SIZE];
        store.read_block(block, &mut buf, None).expect("read failed");
        buf
    }

    pub fn block_path(&self, block: u64) -> PathBuf {
        self.open_store().path_for(block)
    }

    /// Names of leftover temporary files
    pub fn temp_files(&self) -> Vec<String> {
        entries(&self.bucket)
            .into_iter()
            .filter(|n| n.ends_with(".tmp"))
            .collect()
    }
}

fn entries(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .expect("Failed to read bucket dir")
        .map(|e| e.expect("bad entry").file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

/// Every committed block file must be exactly one block long
pub fn validate_no_torn_blocks(dir: &StoreDir) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    for name in entries(dir.bucket()) {
        if name.ends_with(".tmp") {
            continue;
        }
        let len = fs::metadata(dir.bucket().join(&name))
            .map(|m| m.len())
            .unwrap_or(0);
        if len != BLOCK_SIZE as u64 {
            errors.push(format!("{} is {} bytes", name, len));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
