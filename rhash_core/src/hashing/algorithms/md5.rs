//! MD5 hash algorithm implementation

use super::DigestHasher;
use crate::hashing::{HasherOptions, StreamingHasher};
use md5::Md5;

pub(crate) fn create(_options: &HasherOptions) -> Box<dyn StreamingHasher> {
    DigestHasher::<Md5>::boxed()
}
