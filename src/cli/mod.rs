//! CLI module for mockblock
//!
//! Provides command-line access to a store described by a JSON config:
//! - write: Write one block (fill byte, input file, or zero)
//! - read: Read one block, optionally verifying its digest
//! - digest: Print the digest of one block

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command, WriteSource};
pub use commands::{open_store, read, run_command, write, BlockReport};
pub use errors::{CliError, CliErrorCode, CliResult};

/// Parse the process arguments and run the selected command
pub fn run() -> CliResult<()> {
    run_command(Cli::parse_args())
}
