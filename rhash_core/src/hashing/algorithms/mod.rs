//! Hash algorithm implementations
//!
//! Each module exposes factory functions matching
//! [`HasherFactory`](super::traits::HasherFactory); the registry wires them
//! into the descriptor table.

use super::traits::StreamingHasher;
use ::sha2::Digest;

pub(crate) mod blake2;
pub(crate) mod crc32;
pub(crate) mod ed2k;
pub(crate) mod md4;
pub(crate) mod md5;
pub(crate) mod sha1;
pub(crate) mod sha2;
pub(crate) mod sha3;
pub(crate) mod tiger;
pub(crate) mod tth;

/// Adapter for any RustCrypto `Digest` implementation
pub(crate) struct DigestHasher<D> {
    hasher: D,
}

impl<D: Digest> DigestHasher<D> {
    pub(crate) fn boxed() -> Box<dyn StreamingHasher>
    where
        D: Send + 'static,
    {
        Box::new(Self { hasher: D::new() })
    }
}

impl<D: Digest + Send> StreamingHasher for DigestHasher<D> {
    fn update(&mut self, data: &[u8]) {
        Digest::update(&mut self.hasher, data);
    }

    fn finalize(self: Box<Self>) -> Vec<u8> {
        Digest::finalize(self.hasher).to_vec()
    }
}

/// Run a hasher over `data` split at every `step` bytes
#[cfg(test)]
pub(crate) fn hash_in_steps(mut hasher: Box<dyn StreamingHasher>, data: &[u8], step: usize) -> Vec<u8> {
    for chunk in data.chunks(step.max(1)) {
        hasher.update(chunk);
    }
    hasher.finalize()
}

#[cfg(test)]
pub(crate) fn hash_hex(hasher: Box<dyn StreamingHasher>, data: &[u8]) -> String {
    hex::encode(hash_in_steps(hasher, data, data.len().max(1)))
}
