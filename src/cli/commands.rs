//! CLI command implementations
//!
//! Each invocation opens a store from the configuration file, performs one
//! block operation and prints `<name> <sha256-hex>`, or `<name> zero` when
//! the block holds no data.

use std::fmt;
use std::fs;
use std::path::Path;

use crate::observability::LogSink;
use crate::store::{block_name, BlockDigest, BlockStore, FileBlockStore, StoreConfig};

use super::args::{Cli, Command, WriteSource};
use super::errors::{CliError, CliResult};
use super::io::write_stdout;

/// Outcome of a block operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockReport {
    pub block: String,
    /// Hex digest of the content, `None` for a zero block
    pub digest: Option<String>,
}

impl BlockReport {
    fn new(store: &FileBlockStore, block: u64, data: &[u8]) -> Self {
        let zero = data.iter().all(|&b| b == 0);
        Self {
            block: block_name(store.config(), block),
            digest: (!zero).then(|| BlockDigest::of(data).to_hex()),
        }
    }

    pub fn is_zero(&self) -> bool {
        self.digest.is_none()
    }
}

impl fmt::Display for BlockReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.digest {
            Some(digest) => write!(f, "{} {}", self.block, digest),
            None => write!(f, "{} zero", self.block),
        }
    }
}

/// Execute a parsed command line
pub fn run_command(cli: Cli) -> CliResult<()> {
    let store = open_store(&cli)?;

    match cli.command {
        Command::Write { block, source } => {
            let report = write(&store, block, &source)?;
            write_stdout(&report)
        }
        Command::Read {
            block,
            digest,
            output,
        } => {
            let expected = match digest {
                Some(hex) => Some(parse_digest(&hex)?),
                None => None,
            };
            let report = read(&store, block, expected.as_ref(), output.as_deref())?;
            if output.is_none() {
                write_stdout(&report)?;
            }
            Ok(())
        }
        Command::Digest { block } => {
            let report = read(&store, block, None, None)?;
            write_stdout(&report)
        }
    }
}

/// Load the configuration, apply command line overrides, create the store
pub fn open_store(cli: &Cli) -> CliResult<FileBlockStore> {
    let mut config = StoreConfig::load(&cli.config)?;
    if let Some(ms) = cli.max_delay_ms {
        config.fault.max_delay_ms = ms;
    }
    if let Some(rate) = cli.failure_rate {
        config.fault.failure_rate = rate;
    }
    config.log = if cli.quiet {
        LogSink::discard()
    } else {
        LogSink::json_stderr()
    };

    Ok(FileBlockStore::create(config)?)
}

/// Write one block from the selected source
pub fn write(store: &FileBlockStore, block: u64, source: &WriteSource) -> CliResult<BlockReport> {
    let block_size = store.block_size();

    let data = if source.zero {
        None
    } else if let Some(byte) = source.fill {
        Some(vec![byte; block_size])
    } else if let Some(ref input) = source.input {
        let data = fs::read(input).map_err(|e| {
            CliError::io_error(format!("Failed to read {}: {}", input.display(), e))
        })?;
        if data.len() != block_size {
            return Err(CliError::invalid_argument(format!(
                "{} is {} bytes, block size is {}",
                input.display(),
                data.len(),
                block_size
            )));
        }
        Some(data)
    } else {
        return Err(CliError::invalid_argument("no write source given"));
    };

    store.write_block(block, data.as_deref())?;

    Ok(BlockReport::new(store, block, data.as_deref().unwrap_or(&[])))
}

/// Read one block, optionally verifying it and saving it to a file
pub fn read(
    store: &FileBlockStore,
    block: u64,
    expected: Option<&BlockDigest>,
    output: Option<&Path>,
) -> CliResult<BlockReport> {
    let mut buf = vec![0u8; store.block_size()];
    store.read_block(block, &mut buf, expected)?;

    if let Some(output) = output {
        fs::write(output, &buf).map_err(|e| {
            CliError::io_error(format!("Failed to write {}: {}", output.display(), e))
        })?;
    }

    Ok(BlockReport::new(store, block, &buf))
}

fn parse_digest(hex: &str) -> CliResult<BlockDigest> {
    BlockDigest::from_hex(hex)
        .ok_or_else(|| CliError::invalid_argument(format!("invalid digest: {}", hex)))
}
