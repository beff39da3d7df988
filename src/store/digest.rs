//! Block content digests
//!
//! SHA-256 over the full block. Used only to verify a read against a
//! caller-supplied expectation; nothing is stored alongside the block.

use std::fmt;

use sha2::{Digest, Sha256};

/// Length of a digest in bytes
pub const DIGEST_LEN: usize = 32;

/// Fixed-length fingerprint of one block
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct BlockDigest([u8; DIGEST_LEN]);

impl BlockDigest {
    /// Digest of `data`
    pub fn of(data: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(data);
        Self(hasher.finalize().into())
    }

    pub fn from_bytes(bytes: [u8; DIGEST_LEN]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; DIGEST_LEN] {
        &self.0
    }

    /// Lowercase hex, 64 characters
    pub fn to_hex(&self) -> String {
        self.0.iter().map(|b| format!("{:02x}", b)).collect()
    }

    /// Parse 64 hex characters (either case)
    pub fn from_hex(s: &str) -> Option<Self> {
        let s = s.trim();
        if s.len() != DIGEST_LEN * 2 || !s.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        let mut out = [0u8; DIGEST_LEN];
        for (i, byte) in out.iter_mut().enumerate() {
            *byte = u8::from_str_radix(&s[i * 2..i * 2 + 2], 16).ok()?;
        }
        Some(Self(out))
    }

    /// Whether `data` hashes to this digest
    pub fn matches(&self, data: &[u8]) -> bool {
        Self::of(data) == *self
    }
}

impl fmt::Display for BlockDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for BlockDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BlockDigest({})", self.to_hex())
    }
}
