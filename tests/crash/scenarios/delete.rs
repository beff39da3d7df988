//! Zero-block write crash scenarios
//!
//! - Crash before unlink → previous content survives intact

use crate::crash::harness::{run_cli, write_fill};
use crate::crash::utils::{validate_no_torn_blocks, StoreDir, BLOCK_SIZE};
use mockblock::crash_point::points;

#[test]
fn test_crash_before_unlink_keeps_block() {
    let dir = StoreDir::new();
    write_fill(&dir, 1, 0x66);

    let result = run_cli(
        &dir,
        Some(points::BLOCK_DELETE_BEFORE_UNLINK),
        &["write", "--block", "1", "--zero"],
    );
    assert!(result.crashed);

    assert_eq!(dir.read_block(1), vec![0x66u8; BLOCK_SIZE]);
    assert!(validate_no_torn_blocks(&dir).is_ok());
}

#[test]
fn test_zero_write_without_crash_removes_block() {
    let dir = StoreDir::new();
    write_fill(&dir, 1, 0x66);

    let result = run_cli(&dir, None, &["write", "--block", "1", "--fill", "0"]);
    assert!(!result.crashed, "stderr: {}", result.stderr);

    assert!(!dir.block_path(1).exists());
    assert_eq!(dir.read_block(1), vec![0u8; BLOCK_SIZE]);
}

#[test]
fn test_crash_point_for_other_operation_is_ignored() {
    let dir = StoreDir::new();

    // A delete crash point does not fire on a non-zero write
    let result = run_cli(
        &dir,
        Some(points::BLOCK_DELETE_BEFORE_UNLINK),
        &["write", "--block", "2", "--fill", "0x77"],
    );
    assert!(!result.crashed, "stderr: {}", result.stderr);
    assert_eq!(dir.read_block(2), vec![0x77u8; BLOCK_SIZE]);
}
