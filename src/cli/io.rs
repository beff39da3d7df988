//! Line output for CLI commands
//!
//! One report per line on stdout. Store log lines go to stderr so stdout
//! stays machine-readable.

use std::fmt::Display;
use std::io::{self, Write};

use super::errors::CliResult;

/// Write one value as a line
pub fn write_line<T: Display, W: Write>(writer: &mut W, value: &T) -> CliResult<()> {
    writeln!(writer, "{}", value)?;
    writer.flush()?;
    Ok(())
}

/// Write one value as a line to stdout
pub fn write_stdout<T: Display>(value: &T) -> CliResult<()> {
    write_line(&mut io::stdout().lock(), value)
}
