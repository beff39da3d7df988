//! Write crash scenarios
//!
//! - Crash before rename → target keeps its previous content (or stays absent)
//! - Crash after rename → new content is visible
//! - A crash never leaves a torn block behind

use crate::crash::harness::{report_failure, write_fill, write_fill_crashing};
use crate::crash::utils::{validate_no_torn_blocks, StoreDir, BLOCK_SIZE};
use mockblock::crash_point::points;

#[test]
fn test_crash_before_rename_keeps_old_content() {
    let dir = StoreDir::new();
    write_fill(&dir, 1, 0x11);

    write_fill_crashing(&dir, 1, 0x22, points::BLOCK_WRITE_BEFORE_RENAME);

    let content = dir.read_block(1);
    if content != vec![0x11u8; BLOCK_SIZE] {
        report_failure(
            points::BLOCK_WRITE_BEFORE_RENAME,
            "write 0x22 over 0x11",
            "0x11 block",
            &format!("first byte {:#x}", content[0]),
        );
        panic!("target changed by interrupted write");
    }

    // The abandoned temp file holds the new data but is never read
    assert_eq!(dir.temp_files().len(), 1);
    assert!(validate_no_torn_blocks(&dir).is_ok());
}

#[test]
fn test_crash_after_temp_sync_leaves_block_absent() {
    let dir = StoreDir::new();

    write_fill_crashing(&dir, 2, 0x33, points::BLOCK_WRITE_AFTER_TEMP_SYNC);

    assert!(!dir.block_path(2).exists());
    assert_eq!(dir.read_block(2), vec![0u8; BLOCK_SIZE]);
    assert!(validate_no_torn_blocks(&dir).is_ok());
}

#[test]
fn test_crash_after_rename_shows_new_content() {
    let dir = StoreDir::new();
    write_fill(&dir, 3, 0x11);

    write_fill_crashing(&dir, 3, 0x44, points::BLOCK_WRITE_AFTER_RENAME);

    assert_eq!(dir.read_block(3), vec![0x44u8; BLOCK_SIZE]);
    assert!(dir.temp_files().is_empty());
    assert!(validate_no_torn_blocks(&dir).is_ok());
}

#[test]
fn test_write_after_crash_recovers_block() {
    let dir = StoreDir::new();
    write_fill(&dir, 4, 0x11);
    write_fill_crashing(&dir, 4, 0x22, points::BLOCK_WRITE_BEFORE_RENAME);

    // A later successful write is unaffected by the leftover temp file
    write_fill(&dir, 4, 0x55);
    assert_eq!(dir.read_block(4), vec![0x55u8; BLOCK_SIZE]);
}

#[test]
fn test_write_crash_points_defined() {
    assert_eq!(points::BLOCK_WRITE_AFTER_TEMP_SYNC, "block_write_after_temp_sync");
    assert_eq!(points::BLOCK_WRITE_BEFORE_RENAME, "block_write_before_rename");
    assert_eq!(points::BLOCK_WRITE_AFTER_RENAME, "block_write_after_rename");
}
