//! mockblock CLI entry point
//!
//! All logic is delegated to the CLI module. This file only reports
//! errors and sets the exit code.

use mockblock::cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
