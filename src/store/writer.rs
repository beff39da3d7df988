//! Write path
//!
//! Zero blocks are deleted. Everything else goes through a temporary file
//! in the target's directory which is written, synced, closed and then
//! renamed over the target. A reader sees the old content or the new
//! content, never a mix. Every failure removes the temporary file before
//! returning and leaves the target as it was.

use std::ffi::OsString;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use uuid::Uuid;

use super::address;
use super::errors::{StoreError, StoreResult};
use super::fault::BlockOp;
use super::local::FileBlockStore;
use crate::crash_point::{maybe_crash, points};
use crate::observability::Severity;

/// Suffix appended (after a unique id) to temporary block files
pub const TEMP_SUFFIX: &str = ".tmp";

impl FileBlockStore {
    pub(super) fn write_block_file(&self, block_num: u64, src: Option<&[u8]>) -> StoreResult<()> {
        if let Some(src) = src {
            self.check_buffer(src.len())?;
        }
        let src = src.filter(|data| **data != *self.zero_block);
        let name = address::block_name(&self.config, block_num);

        self.log(
            Severity::Info,
            &format!(
                "write {} started{}",
                name,
                if src.is_none() { " (zero block)" } else { "" }
            ),
        );

        let op = if src.is_some() {
            BlockOp::Write
        } else {
            BlockOp::Delete
        };
        self.inject_faults(op, &name)?;

        let path = address::path_for(&self.config, block_num);
        match src {
            None => self.delete_block_file(&path)?,
            Some(data) => self.replace_block_file(&path, data)?,
        }

        self.log(Severity::Info, &format!("write {} complete", name));
        Ok(())
    }

    fn delete_block_file(&self, path: &Path) -> StoreResult<()> {
        maybe_crash(points::BLOCK_DELETE_BEFORE_UNLINK);

        match fs::remove_file(path) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => {
                self.stats.increment_io_errors();
                self.log(
                    Severity::Error,
                    &format!("can't unlink {}: {}", path.display(), e),
                );
                return Err(StoreError::io(
                    format!("can't unlink {}", path.display()),
                    e,
                ));
            }
        }
        self.stats.increment_deletes();
        Ok(())
    }

    fn replace_block_file(&self, path: &Path, data: &[u8]) -> StoreResult<()> {
        let temp = temp_path_for(path);

        let file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&temp)
            .map_err(|e| self.write_failed(&temp, "can't create", e))?;
        self.fill_temp(&temp, file, data)?;

        maybe_crash(points::BLOCK_WRITE_BEFORE_RENAME);
        if let Err(e) = fs::rename(&temp, path) {
            self.remove_temp(&temp);
            return Err(self.write_failed(&temp, "can't rename", e));
        }
        maybe_crash(points::BLOCK_WRITE_AFTER_RENAME);

        // The new content is already visible; a failed directory sync only
        // weakens durability across power loss.
        if let Err(e) = sync_parent_dir(path) {
            self.log(
                Severity::Warn,
                &format!("can't sync directory of {}: {}", path.display(), e),
            );
        }

        self.stats.increment_writes();
        Ok(())
    }

    /// Write the whole block, sync, close. The temp file is removed on failure.
    fn fill_temp<W: SyncWrite>(&self, temp: &Path, mut file: W, data: &[u8]) -> StoreResult<()> {
        match file.write_all(data).and_then(|()| file.sync()) {
            Ok(()) => {
                maybe_crash(points::BLOCK_WRITE_AFTER_TEMP_SYNC);
                drop(file);
                Ok(())
            }
            Err(e) => {
                drop(file);
                self.remove_temp(temp);
                Err(self.write_failed(temp, "can't write", e))
            }
        }
    }

    fn remove_temp(&self, temp: &Path) {
        match fs::remove_file(temp) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => self.log(
                Severity::Warn,
                &format!("can't remove {}: {}", temp.display(), e),
            ),
        }
    }

    fn write_failed(&self, temp: &Path, what: &str, e: io::Error) -> StoreError {
        self.stats.increment_io_errors();
        self.log(
            Severity::Error,
            &format!("{} {}: {}", what, temp.display(), e),
        );
        StoreError::io(format!("{} {}", what, temp.display()), e)
    }
}

/// `<target>.<uuid>.tmp`, next to the target
fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(OsString::from).unwrap_or_default();
    name.push(format!(".{}{}", Uuid::new_v4().simple(), TEMP_SUFFIX));
    path.with_file_name(name)
}

/// A writer whose contents can be forced to stable storage
trait SyncWrite: Write {
    fn sync(&mut self) -> io::Result<()>;
}

impl SyncWrite for File {
    fn sync(&mut self) -> io::Result<()> {
        self.sync_all()
    }
}

fn sync_parent_dir(path: &Path) -> io::Result<()> {
    match path.parent() {
        Some(parent) => File::open(parent)?.sync_all(),
        None => Ok(()),
    }
}
