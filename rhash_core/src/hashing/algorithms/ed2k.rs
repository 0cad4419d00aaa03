//! ED2K hash algorithm implementation

use crate::hashing::{Ed2kVariant, HasherOptions, StreamingHasher};
use md4::{Digest, Md4};

/// ED2K chunk size (9500 KiB)
pub(crate) const CHUNK_SIZE: usize = 9_728_000;

/// ED2K streaming hasher
///
/// Each chunk is hashed as it streams in, so only the finished chunk hashes
/// are kept rather than the chunk data itself.
pub(crate) struct Ed2kStreamingHasher {
    // MD4 state of the chunk currently being filled
    current: Md4,
    current_len: usize,

    // Completed chunk hashes, 16 bytes each
    chunk_hashes: Vec<u8>,

    variant: Ed2kVariant,
}

impl Ed2kStreamingHasher {
    pub(crate) fn new(variant: Ed2kVariant) -> Self {
        Self {
            current: Md4::new(),
            current_len: 0,
            chunk_hashes: Vec::new(),
            variant,
        }
    }

    fn close_chunk(&mut self) {
        let chunk = std::mem::replace(&mut self.current, Md4::new());
        self.chunk_hashes.extend_from_slice(&chunk.finalize());
        self.current_len = 0;
    }
}

impl StreamingHasher for Ed2kStreamingHasher {
    fn update(&mut self, data: &[u8]) {
        let mut remaining = data;

        while !remaining.is_empty() {
            let to_take = remaining.len().min(CHUNK_SIZE - self.current_len);
            self.current.update(&remaining[..to_take]);
            self.current_len += to_take;
            remaining = &remaining[to_take..];

            if self.current_len == CHUNK_SIZE {
                self.close_chunk();
            }
        }
    }

    fn finalize(mut self: Box<Self>) -> Vec<u8> {
        if self.chunk_hashes.is_empty() {
            // Shorter than one chunk: plain MD4 of the data
            return self.current.finalize().to_vec();
        }

        if self.current_len > 0 {
            self.close_chunk();
        } else if self.variant == Ed2kVariant::Red {
            // Exact multiple of the chunk size
            self.chunk_hashes.extend_from_slice(&Md4::digest(b""));
        }

        if self.chunk_hashes.len() == 16 {
            return self.chunk_hashes;
        }

        Md4::digest(&self.chunk_hashes).to_vec()
    }
}

pub(crate) fn create(options: &HasherOptions) -> Box<dyn StreamingHasher> {
    Box::new(Ed2kStreamingHasher::new(options.ed2k_variant))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hashing::algorithms::{hash_hex, hash_in_steps};

    fn hasher(variant: Ed2kVariant) -> Box<dyn StreamingHasher> {
        create(&HasherOptions {
            ed2k_variant: variant,
        })
    }

    fn md4_concat(parts: &[&[u8]]) -> Vec<u8> {
        let mut list = Vec::new();
        for part in parts {
            list.extend_from_slice(&Md4::digest(part));
        }
        Md4::digest(&list).to_vec()
    }

    #[test]
    fn test_ed2k_known_vectors() {
        let test_cases: Vec<(&[u8], &str)> = vec![
            (b"", "31d6cfe0d16ae931b73c59d7e0c089c0"),
            (b"a", "bde52cb31de33e46245e05fbdbd6fb24"),
            (b"test content", "a69899814931280e2f527219ad6ac754"),
        ];

        for (input, expected) in test_cases {
            assert_eq!(hash_hex(hasher(Ed2kVariant::Red), input), expected);
            assert_eq!(hash_hex(hasher(Ed2kVariant::Blue), input), expected);
        }
    }

    #[test]
    fn test_exact_chunk_variants_diverge() {
        let data = vec![0u8; CHUNK_SIZE];

        let blue = hash_in_steps(hasher(Ed2kVariant::Blue), &data, 1 << 20);
        let red = hash_in_steps(hasher(Ed2kVariant::Red), &data, 1 << 20);

        assert_eq!(blue, Md4::digest(&data).to_vec());
        assert_eq!(red, md4_concat(&[&data[..], &b""[..]]));
        assert_ne!(blue, red);
    }

    #[test]
    fn test_multi_chunk_matches_chunk_hash_list() {
        let data: Vec<u8> = (0..CHUNK_SIZE + 1000).map(|i| (i % 251) as u8).collect();
        let expected = md4_concat(&[&data[..CHUNK_SIZE], &data[CHUNK_SIZE..]]);

        for variant in [Ed2kVariant::Red, Ed2kVariant::Blue] {
            assert_eq!(hash_in_steps(hasher(variant), &data, 777_777), expected);
            assert_eq!(hash_in_steps(hasher(variant), &data, data.len()), expected);
        }
    }
}
