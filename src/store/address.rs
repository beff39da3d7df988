//! Block number to file path mapping
//!
//! `root/prefix + hex(block_num)`, lowercase, zero-padded to
//! `block_digits`. The layout is flat: no directory fan-out.

use std::path::PathBuf;

use super::config::StoreConfig;

/// File name of a block: prefix plus padded hex block number
///
/// The width is a minimum. Block numbers needing more digits are
/// rendered in full rather than truncated.
pub fn block_name(config: &StoreConfig, block_num: u64) -> String {
    format!(
        "{}{:0width$x}",
        config.prefix,
        block_num,
        width = config.block_digits
    )
}

/// Full path of the file backing `block_num`
pub fn path_for(config: &StoreConfig, block_num: u64) -> PathBuf {
    config.root.join(block_name(config, block_num))
}
