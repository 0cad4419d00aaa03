//! Finalized digests and their comparison

use super::HashAlgorithm;
use crate::format::{self, PrintFlags};
use std::fmt;
use std::hash::{Hash, Hasher};

const FNV_OFFSET_BASIS: u32 = 0x811c_9dc5;
const FNV_PRIME: u32 = 0x0100_0193;

/// Immutable output of one algorithm over one message
#[derive(Clone)]
pub struct Digest {
    algorithm: HashAlgorithm,
    bytes: Box<[u8]>,
    message_length: u64,
}

impl Digest {
    pub(crate) fn new(algorithm: HashAlgorithm, bytes: Vec<u8>, message_length: u64) -> Self {
        debug_assert_eq!(bytes.len(), algorithm.digest_size(), "{algorithm} digest size");
        Self {
            algorithm,
            bytes: bytes.into_boxed_slice(),
            message_length,
        }
    }

    pub fn algorithm(&self) -> HashAlgorithm {
        self.algorithm
    }

    /// Flag bit of the producing algorithm
    pub fn id(&self) -> u32 {
        self.algorithm.id()
    }

    /// Binary digest
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Number of message bytes the digest was computed over
    pub fn message_length(&self) -> u64 {
        self.message_length
    }

    /// Same algorithm and byte-identical output
    ///
    /// Always walks the full digest rather than stopping at the first
    /// difference.
    pub fn equals(&self, other: &Digest) -> bool {
        if self.algorithm != other.algorithm || self.bytes.len() != other.bytes.len() {
            return false;
        }
        let difference = self
            .bytes
            .iter()
            .zip(other.bytes.iter())
            .fold(0u8, |acc, (a, b)| acc | (a ^ b));
        difference == 0
    }

    /// FNV-1a over the algorithm id and the digest bytes
    ///
    /// Stable across runs, and equal for digests that compare equal.
    pub fn hash_code(&self) -> u32 {
        self.id()
            .to_le_bytes()
            .iter()
            .chain(self.bytes.iter())
            .fold(FNV_OFFSET_BASIS, |hash, byte| {
                (hash ^ u32::from(*byte)).wrapping_mul(FNV_PRIME)
            })
    }

    /// Render the digest as text (or raw bytes) according to `flags`
    pub fn print_bytes(&self, flags: PrintFlags) -> Vec<u8> {
        format::print_digest(self, flags)
    }

    /// Render the digest in the algorithm's default encoding
    pub fn to_text(&self, flags: PrintFlags) -> String {
        format::print_digest_text(self, flags)
    }
}

impl PartialEq for Digest {
    fn eq(&self, other: &Self) -> bool {
        self.equals(other)
    }
}

impl Eq for Digest {}

impl Hash for Digest {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u32(self.hash_code());
    }
}

impl AsRef<[u8]> for Digest {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

impl fmt::Debug for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Digest")
            .field("algorithm", &self.algorithm)
            .field("bytes", &hex::encode(&self.bytes))
            .field("message_length", &self.message_length)
            .finish()
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text(PrintFlags::DEFAULT))
    }
}
