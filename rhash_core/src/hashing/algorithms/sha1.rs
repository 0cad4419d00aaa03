//! SHA1 hash algorithm implementation

use super::DigestHasher;
use crate::hashing::{HasherOptions, StreamingHasher};
use sha1::Sha1;

pub(crate) fn create(_options: &HasherOptions) -> Box<dyn StreamingHasher> {
    DigestHasher::<Sha1>::boxed()
}
