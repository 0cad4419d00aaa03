//! BLAKE2 implementations (full-length BLAKE2s-256 and BLAKE2b-512)

use super::DigestHasher;
use crate::hashing::{HasherOptions, StreamingHasher};
use blake2::{Blake2b512, Blake2s256};

pub(crate) fn create_blake2s(_options: &HasherOptions) -> Box<dyn StreamingHasher> {
    DigestHasher::<Blake2s256>::boxed()
}

pub(crate) fn create_blake2b(_options: &HasherOptions) -> Box<dyn StreamingHasher> {
    DigestHasher::<Blake2b512>::boxed()
}
