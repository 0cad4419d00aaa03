//! SHA-2 family implementations

use super::DigestHasher;
use crate::hashing::{HasherOptions, StreamingHasher};
use sha2::{Sha224, Sha256, Sha384, Sha512};

pub(crate) fn create_sha224(_options: &HasherOptions) -> Box<dyn StreamingHasher> {
    DigestHasher::<Sha224>::boxed()
}

pub(crate) fn create_sha256(_options: &HasherOptions) -> Box<dyn StreamingHasher> {
    DigestHasher::<Sha256>::boxed()
}

pub(crate) fn create_sha384(_options: &HasherOptions) -> Box<dyn StreamingHasher> {
    DigestHasher::<Sha384>::boxed()
}

pub(crate) fn create_sha512(_options: &HasherOptions) -> Box<dyn StreamingHasher> {
    DigestHasher::<Sha512>::boxed()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hashing::algorithms::hash_hex;

    #[test]
    fn test_sha2_known_vectors() {
        let options = HasherOptions::default();

        assert_eq!(
            hash_hex(create_sha256(&options), b""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
        assert_eq!(
            hash_hex(create_sha256(&options), b"abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
        assert_eq!(
            hash_hex(create_sha224(&options), b"abc"),
            "23097d223405d8228642a477bda255b32aadbce4bda0b3f7e36c9da7"
        );
        assert_eq!(
            hash_hex(create_sha384(&options), b"abc"),
            "cb00753f45a35e8bb5a03d699ac65007272c32ab0eded1631a8b605a43ff5bed\
             8086072ba1e7cc2358baeca134c825a7"
        );
        assert_eq!(
            hash_hex(create_sha512(&options), b"abc"),
            "ddaf35a193617abacc417349ae20413112e6fa4e89a97ea20a9eeee64b55d39a\
             2192992a274fc1a836ba3c23a3feebbd454d4423643ce80e2a9ac94fa54ca49f"
        );
    }
}
