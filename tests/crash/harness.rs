//! Crash test harness for subprocess management
//!
//! - Runs the `mockblock` binary against a store directory
//! - Arms a crash point through the environment
//! - Captures exit status and output

use std::process::{Command, ExitStatus};

use mockblock::crash_point::CRASH_POINT_ENV;

use super::utils::StoreDir;

/// Result of one subprocess run
#[derive(Debug)]
pub struct CrashTestResult {
    /// Whether the process exited unsuccessfully
    pub crashed: bool,
    pub exit_status: Option<ExitStatus>,
    pub stdout: String,
    pub stderr: String,
}

/// Run `mockblock <args>` against `dir`, optionally with a crash point armed
pub fn run_cli(dir: &StoreDir, crash_point: Option<&str>, args: &[&str]) -> CrashTestResult {
    let mut command = Command::new(env!("CARGO_BIN_EXE_mockblock"));
    command
        .arg("--config")
        .arg(dir.config_path())
        .arg("--quiet")
        .args(args);

    match crash_point {
        Some(point) => {
            command.env(CRASH_POINT_ENV, point);
        }
        None => {
            command.env_remove(CRASH_POINT_ENV);
        }
    }

    match command.output() {
        Ok(output) => CrashTestResult {
            crashed: !output.status.success(),
            exit_status: Some(output.status),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        },
        Err(e) => CrashTestResult {
            crashed: true,
            exit_status: None,
            stdout: String::new(),
            stderr: format!("Failed to execute: {}", e),
        },
    }
}

/// Run a write that must complete normally
pub fn write_fill(dir: &StoreDir, block: u64, fill: u8) {
    let block = block.to_string();
    let fill = format!("{:#x}", fill);
    let result = run_cli(dir, None, &["write", "--block", &block, "--fill", &fill]);
    assert!(
        !result.crashed,
        "setup write failed: {}",
        result.stderr
    );
}

/// Run a write with `point` armed; the process must die
pub fn write_fill_crashing(dir: &StoreDir, block: u64, fill: u8, point: &str) -> CrashTestResult {
    let block = block.to_string();
    let fill = format!("{:#x}", fill);
    let result = run_cli(dir, Some(point), &["write", "--block", &block, "--fill", &fill]);
    assert!(result.crashed, "expected crash at {}", point);
    assert!(result.stderr.contains(point), "stderr: {}", result.stderr);
    result
}

/// Report crash test failure context
pub fn report_failure(crash_point: &str, operation: &str, expected: &str, actual: &str) {
    eprintln!("=== CRASH TEST FAILURE ===");
    eprintln!("Crash point: {}", crash_point);
    eprintln!("Operation: {}", operation);
    eprintln!("Expected: {}", expected);
    eprintln!("Actual: {}", actual);
    eprintln!("==========================");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crash::utils::BLOCK_SIZE;
    use mockblock::store::BlockDigest;

    fn sha256_hex(data: &[u8]) -> String {
        BlockDigest::of(data).to_hex()
    }

    #[test]
    fn test_cli_without_crash_point_succeeds() {
        let dir = StoreDir::new();
        let result = run_cli(&dir, None, &["digest", "--block", "1"]);
        assert!(!result.crashed, "stderr: {}", result.stderr);

        assert_eq!(result.stdout, "blk00001 zero\n");
    }

    #[test]
    fn test_read_prints_name_and_digest() {
        let dir = StoreDir::new();
        write_fill(&dir, 1, 0x42);

        let result = run_cli(&dir, None, &["read", "--block", "1"]);
        assert!(!result.crashed, "stderr: {}", result.stderr);
        let digest = sha256_hex(&[0x42u8; BLOCK_SIZE]);
        assert_eq!(result.stdout, format!("blk00001 {}\n", digest));

        let result = run_cli(&dir, None, &["read", "--block", "2"]);
        assert_eq!(result.stdout, "blk00002 zero\n");
    }

    #[test]
    fn test_read_with_output_is_silent() {
        let dir = StoreDir::new();
        write_fill(&dir, 1, 0x42);
        let out = dir.config_path().with_file_name("out.bin");
        let out_arg = out.to_string_lossy().into_owned();

        let result = run_cli(&dir, None, &["read", "--block", "1", "--output", &out_arg]);
        assert!(!result.crashed, "stderr: {}", result.stderr);
        assert!(result.stdout.is_empty(), "stdout: {}", result.stdout);
        assert_eq!(std::fs::read(&out).unwrap(), vec![0x42u8; BLOCK_SIZE]);
    }
}
