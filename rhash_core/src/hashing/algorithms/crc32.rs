//! CRC32 hash algorithm implementation

use crate::hashing::{HasherOptions, StreamingHasher};
use crc32fast::Hasher as Crc32Hasher;

/// CRC32 streaming hasher
struct Crc32StreamingHasher {
    hasher: Crc32Hasher,
}

impl StreamingHasher for Crc32StreamingHasher {
    fn update(&mut self, data: &[u8]) {
        self.hasher.update(data);
    }

    fn finalize(self: Box<Self>) -> Vec<u8> {
        // Big-endian so the hex rendering reads like the usual 8-digit checksum
        self.hasher.finalize().to_be_bytes().to_vec()
    }
}

pub(crate) fn create(_options: &HasherOptions) -> Box<dyn StreamingHasher> {
    Box::new(Crc32StreamingHasher {
        hasher: Crc32Hasher::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hashing::algorithms::hash_hex;

    #[test]
    fn test_crc32_known_vectors() {
        let options = HasherOptions::default();
        assert_eq!(hash_hex(create(&options), b""), "00000000");
        assert_eq!(hash_hex(create(&options), b"abc"), "352441c2");
        assert_eq!(hash_hex(create(&options), b"123456789"), "cbf43926");
    }
}
