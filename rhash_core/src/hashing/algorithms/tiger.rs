//! Tiger/192 hash algorithm implementation

use super::DigestHasher;
use crate::hashing::{HasherOptions, StreamingHasher};
use tiger::Tiger;

pub(crate) fn create(_options: &HasherOptions) -> Box<dyn StreamingHasher> {
    DigestHasher::<Tiger>::boxed()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hashing::algorithms::hash_hex;

    #[test]
    fn test_tiger_known_vectors() {
        let options = HasherOptions::default();

        assert_eq!(
            hash_hex(create(&options), b""),
            "3293ac630c13f0245f92bbb1766e16167a4e58492dde73f3"
        );
        assert_eq!(
            hash_hex(create(&options), b"abc"),
            "2aab1484e8c158f2bfb8c5ff41b57a525129131c957b5f93"
        );
    }
}
