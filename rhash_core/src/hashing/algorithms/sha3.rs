//! SHA-3 family implementations

use super::DigestHasher;
use crate::hashing::{HasherOptions, StreamingHasher};
use sha3::{Sha3_224, Sha3_256, Sha3_384, Sha3_512};

pub(crate) fn create_224(_options: &HasherOptions) -> Box<dyn StreamingHasher> {
    DigestHasher::<Sha3_224>::boxed()
}

pub(crate) fn create_256(_options: &HasherOptions) -> Box<dyn StreamingHasher> {
    DigestHasher::<Sha3_256>::boxed()
}

pub(crate) fn create_384(_options: &HasherOptions) -> Box<dyn StreamingHasher> {
    DigestHasher::<Sha3_384>::boxed()
}

pub(crate) fn create_512(_options: &HasherOptions) -> Box<dyn StreamingHasher> {
    DigestHasher::<Sha3_512>::boxed()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hashing::algorithms::hash_hex;

    #[test]
    fn test_sha3_known_vectors() {
        let options = HasherOptions::default();

        assert_eq!(
            hash_hex(create_256(&options), b""),
            "a7ffc6f8bf1ed76651c14756a061d662f580ff4de43b49fa82d80a4b80f8434a"
        );
        assert_eq!(
            hash_hex(create_256(&options), b"abc"),
            "3a985da74fe225b2045c172d6bd390bd855f086e3e9d525b46bfe24511431532"
        );
        assert_eq!(
            hash_hex(create_224(&options), b"abc"),
            "e642824c3f8cf24ad09234ee7d3c766fc9a3a5168d0c94ad73b46fdf"
        );
        assert_eq!(
            hash_hex(create_384(&options), b"abc"),
            "ec01498288516fc926459f58e2c6ad8df9b473cb0fc08c2596da7cf0e49be4b2\
             98d88cea927ac7f539f1edf228376d25"
        );
        assert_eq!(
            hash_hex(create_512(&options), b"abc"),
            "b751850b1a57168a5693cd924b6b096e08f621827444f70d884f5d0240d2712e\
             10e116e9192af3c91a7ec57647e3934057340b4cf408d5a56592f8274eec53f0"
        );
    }
}
