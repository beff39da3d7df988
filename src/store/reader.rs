//! Read path
//!
//! 1. Inject faults
//! 2. Absent file -> all zeros, Ok
//! 3. Read exactly one block; a short file is `Truncated`
//! 4. Optional digest check; on mismatch the bytes stay in `dest`

use std::fs::File;
use std::io::{self, Read};

use super::address;
use super::digest::BlockDigest;
use super::errors::{StoreError, StoreResult};
use super::fault::BlockOp;
use super::local::FileBlockStore;
use crate::observability::Severity;

impl FileBlockStore {
    pub(super) fn read_block_file(
        &self,
        block_num: u64,
        dest: &mut [u8],
        expected: Option<&BlockDigest>,
    ) -> StoreResult<()> {
        self.check_buffer(dest.len())?;
        let block_size = self.config.block_size;
        let name = address::block_name(&self.config, block_num);

        self.log(Severity::Info, &format!("read {} started", name));
        self.inject_faults(BlockOp::Read, &name)?;

        let path = address::path_for(&self.config, block_num);

        let mut file = match File::open(&path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                dest.fill(0);
                self.stats.increment_reads();
                self.stats.increment_zero_reads();
                self.log(
                    Severity::Info,
                    &format!("read {} complete (zero block)", name),
                );
                return Ok(());
            }
            Err(e) => {
                self.stats.increment_io_errors();
                self.log(
                    Severity::Error,
                    &format!("can't open {}: {}", path.display(), e),
                );
                return Err(StoreError::io(
                    format!("can't open {}", path.display()),
                    e,
                ));
            }
        };

        let total = match read_full(&mut file, dest) {
            Ok(total) => total,
            Err(e) => {
                self.stats.increment_io_errors();
                self.log(
                    Severity::Error,
                    &format!("can't read {}: {}", path.display(), e),
                );
                return Err(StoreError::io(
                    format!("can't read {}", path.display()),
                    e,
                ));
            }
        };

        if total != block_size {
            self.stats.increment_corruptions();
            let err = StoreError::Truncated {
                path,
                read: total,
                expected: block_size,
            };
            self.log(Severity::Error, &err.to_string());
            return Err(err);
        }

        if let Some(expected) = expected {
            let actual = BlockDigest::of(dest);
            if actual != *expected {
                self.stats.increment_corruptions();
                let err = StoreError::DigestMismatch {
                    path,
                    expected: *expected,
                    actual,
                };
                self.log(Severity::Error, &err.to_string());
                return Err(err);
            }
        }

        self.stats.increment_reads();
        self.log(Severity::Info, &format!("read {} complete", name));
        Ok(())
    }
}

/// Read until `buf` is full or EOF; returns the byte count
fn read_full<R: Read>(reader: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut total = 0;
    while total < buf.len() {
        match reader.read(&mut buf[total..]) {
            Ok(0) => break,
            Ok(n) => total += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(total)
}
