//! Block store errors
//!
//! Error codes:
//! - MOCKBLOCK_OUT_OF_MEMORY (FATAL) - allocation failed at creation
//! - MOCKBLOCK_TRANSIENT (ERROR) - injected fault, caller may retry
//! - MOCKBLOCK_TRUNCATED (FATAL) - block file shorter than block size
//! - MOCKBLOCK_DIGEST_MISMATCH (FATAL) - content does not match expected digest
//! - MOCKBLOCK_IO_ERROR (ERROR) - underlying filesystem failure
//! - MOCKBLOCK_OUT_OF_SPACE (ERROR) - filesystem full during a write
//! - MOCKBLOCK_BUFFER_SIZE (ERROR) - caller buffer is not one block long
//! - MOCKBLOCK_INVALID_CONFIG (FATAL) - store cannot be created
//!
//! FATAL here means "not retryable without external repair", never
//! "terminate the process".

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use super::digest::BlockDigest;
use crate::observability::Severity;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Block store errors
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Out of memory allocating {0} byte zero block")]
    OutOfMemory(usize),

    #[error("Transient failure (injected)")]
    Transient,

    #[error("{}: file is truncated (only read {read} out of {expected} bytes)", path.display())]
    Truncated {
        path: PathBuf,
        read: usize,
        expected: usize,
    },

    #[error("{}: wrong checksum (expected {expected}, got {actual})", path.display())]
    DigestMismatch {
        path: PathBuf,
        expected: BlockDigest,
        actual: BlockDigest,
    },

    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: io::Error,
    },

    #[error("{context}: out of space: {source}")]
    OutOfSpace {
        context: String,
        #[source]
        source: io::Error,
    },

    #[error("Buffer is {actual} bytes, block size is {expected}")]
    BufferSize { expected: usize, actual: usize },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl StoreError {
    /// Wrap an I/O failure, separating out a full filesystem
    pub fn io(context: impl Into<String>, source: io::Error) -> Self {
        let context = context.into();
        if source.kind() == io::ErrorKind::StorageFull {
            StoreError::OutOfSpace { context, source }
        } else {
            StoreError::Io { context, source }
        }
    }

    /// Stable error code
    pub fn code(&self) -> &'static str {
        match self {
            StoreError::OutOfMemory(_) => "MOCKBLOCK_OUT_OF_MEMORY",
            StoreError::Transient => "MOCKBLOCK_TRANSIENT",
            StoreError::Truncated { .. } => "MOCKBLOCK_TRUNCATED",
            StoreError::DigestMismatch { .. } => "MOCKBLOCK_DIGEST_MISMATCH",
            StoreError::Io { .. } => "MOCKBLOCK_IO_ERROR",
            StoreError::OutOfSpace { .. } => "MOCKBLOCK_OUT_OF_SPACE",
            StoreError::BufferSize { .. } => "MOCKBLOCK_BUFFER_SIZE",
            StoreError::InvalidConfig(_) => "MOCKBLOCK_INVALID_CONFIG",
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            StoreError::OutOfMemory(_)
            | StoreError::Truncated { .. }
            | StoreError::DigestMismatch { .. }
            | StoreError::InvalidConfig(_) => Severity::Fatal,
            StoreError::Transient
            | StoreError::Io { .. }
            | StoreError::OutOfSpace { .. }
            | StoreError::BufferSize { .. } => Severity::Error,
        }
    }

    /// Only injected faults are safe to retry blindly
    pub fn is_retryable(&self) -> bool {
        matches!(self, StoreError::Transient)
    }

    /// Stored data is damaged
    pub fn is_corruption(&self) -> bool {
        matches!(
            self,
            StoreError::Truncated { .. } | StoreError::DigestMismatch { .. }
        )
    }

    /// The OS-level cause, when there is one
    pub fn io_kind(&self) -> Option<io::ErrorKind> {
        match self {
            StoreError::Io { source, .. } | StoreError::OutOfSpace { source, .. } => {
                Some(source.kind())
            }
            _ => None,
        }
    }
}
