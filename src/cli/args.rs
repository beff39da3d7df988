//! CLI argument definitions using clap
//!
//! Commands:
//! - mockblock write --block <n> (--fill <byte> | --input <file> | --zero)
//! - mockblock read --block <n> [--digest <hex>] [--output <file>]
//! - mockblock digest --block <n>

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// mockblock - filesystem-backed mock block store
#[derive(Parser, Debug)]
#[command(name = "mockblock")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(long, global = true, default_value = "./mockblock.json")]
    pub config: PathBuf,

    /// Do not emit store log lines
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Override the configured maximum injected delay (milliseconds)
    #[arg(long, global = true)]
    pub max_delay_ms: Option<u64>,

    /// Override the configured transient failure rate
    #[arg(long, global = true)]
    pub failure_rate: Option<f64>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Write one block
    Write {
        /// Block number (decimal or 0x-prefixed hex)
        #[arg(long, value_parser = parse_block_num)]
        block: u64,

        #[command(flatten)]
        source: WriteSource,
    },

    /// Read one block and report its digest
    Read {
        /// Block number (decimal or 0x-prefixed hex)
        #[arg(long, value_parser = parse_block_num)]
        block: u64,

        /// Expected SHA-256 digest (hex)
        #[arg(long)]
        digest: Option<String>,

        /// Write the block content to this file
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Print the digest of one block
    Digest {
        /// Block number (decimal or 0x-prefixed hex)
        #[arg(long, value_parser = parse_block_num)]
        block: u64,
    },
}

/// Where the content of a write comes from
#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
pub struct WriteSource {
    /// Fill the whole block with this byte (decimal or 0x-prefixed hex)
    #[arg(long, value_parser = parse_byte)]
    pub fill: Option<u8>,

    /// Read the block content from this file (must be one block long)
    #[arg(long)]
    pub input: Option<PathBuf>,

    /// Write a zero block (deletes the backing file)
    #[arg(long)]
    pub zero: bool,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

fn parse_number(s: &str) -> Result<u64, String> {
    let s = s.trim();
    let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u64::from_str_radix(hex, 16),
        None => s.parse::<u64>(),
    };
    parsed.map_err(|e| format!("invalid number '{}': {}", s, e))
}

fn parse_block_num(s: &str) -> Result<u64, String> {
    parse_number(s)
}

fn parse_byte(s: &str) -> Result<u8, String> {
    let n = parse_number(s)?;
    u8::try_from(n).map_err(|_| format!("byte value out of range: {}", n))
}
