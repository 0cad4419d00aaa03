//! MD4 hash algorithm implementation

use super::DigestHasher;
use crate::hashing::{HasherOptions, StreamingHasher};
use md4::Md4;

pub(crate) fn create(_options: &HasherOptions) -> Box<dyn StreamingHasher> {
    DigestHasher::<Md4>::boxed()
}
