//! Tiger Tree Hash (TTH) algorithm implementation

use crate::hashing::{HasherOptions, StreamingHasher};
use tiger::{Digest, Tiger};

const LEAF_SIZE: usize = 1024;
const LEAF_PREFIX: u8 = 0x00;
const NODE_PREFIX: u8 = 0x01;

type NodeHash = [u8; 24];

/// TTH streaming hasher
///
/// Keeps at most one pending node per tree level: a finished leaf is merged
/// with its left sibling as soon as one exists, so memory grows with the
/// logarithm of the input length.
struct TthStreamingHasher {
    leaf: Tiger,
    leaf_len: usize,
    // (level, hash), levels strictly decreasing from bottom to top
    pending: Vec<(u32, NodeHash)>,
}

fn leaf_hasher() -> Tiger {
    let mut hasher = Tiger::new();
    hasher.update([LEAF_PREFIX]);
    hasher
}

fn node_hash(hasher: Tiger) -> NodeHash {
    let mut hash = [0u8; 24];
    hash.copy_from_slice(&hasher.finalize());
    hash
}

fn combine(left: &NodeHash, right: &NodeHash) -> NodeHash {
    let mut hasher = Tiger::new();
    hasher.update([NODE_PREFIX]);
    hasher.update(left);
    hasher.update(right);
    node_hash(hasher)
}

impl TthStreamingHasher {
    fn new() -> Self {
        Self {
            leaf: leaf_hasher(),
            leaf_len: 0,
            pending: Vec::new(),
        }
    }

    fn finish_leaf(&mut self) {
        let leaf = std::mem::replace(&mut self.leaf, leaf_hasher());
        self.leaf_len = 0;

        let mut level = 0;
        let mut hash = node_hash(leaf);
        while let Some(&(top_level, left)) = self.pending.last() {
            if top_level != level {
                break;
            }
            self.pending.pop();
            hash = combine(&left, &hash);
            level += 1;
        }
        self.pending.push((level, hash));
    }
}

impl StreamingHasher for TthStreamingHasher {
    fn update(&mut self, data: &[u8]) {
        let mut remaining = data;

        while !remaining.is_empty() {
            let to_take = remaining.len().min(LEAF_SIZE - self.leaf_len);
            self.leaf.update(&remaining[..to_take]);
            self.leaf_len += to_take;
            remaining = &remaining[to_take..];

            if self.leaf_len == LEAF_SIZE {
                self.finish_leaf();
            }
        }
    }

    fn finalize(mut self: Box<Self>) -> Vec<u8> {
        // Empty input hashes as a single empty leaf
        if self.leaf_len > 0 || self.pending.is_empty() {
            self.finish_leaf();
        }

        // Unpaired right-hand nodes are promoted, which is the same as folding
        // the pending stack from the top down
        let mut root = match self.pending.pop() {
            Some((_, hash)) => hash,
            None => return Vec::new(),
        };
        while let Some((_, left)) = self.pending.pop() {
            root = combine(&left, &root);
        }
        root.to_vec()
    }
}

pub(crate) fn create(_options: &HasherOptions) -> Box<dyn StreamingHasher> {
    Box::new(TthStreamingHasher::new())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::encoding::base32_encode;
    use crate::hashing::algorithms::hash_in_steps;

    /// Level-by-level THEX construction used as an oracle
    fn reference_tth(data: &[u8]) -> Vec<u8> {
        let mut level: Vec<NodeHash> = if data.is_empty() {
            vec![node_hash(leaf_hasher())]
        } else {
            data.chunks(LEAF_SIZE)
                .map(|leaf| {
                    let mut hasher = leaf_hasher();
                    hasher.update(leaf);
                    node_hash(hasher)
                })
                .collect()
        };

        while level.len() > 1 {
            level = level
                .chunks(2)
                .map(|pair| match pair {
                    [left, right] => combine(left, right),
                    [single] => *single,
                    _ => unreachable!(),
                })
                .collect();
        }
        level[0].to_vec()
    }

    #[test]
    fn test_tth_dcpp_reference_vectors() {
        let test_cases: Vec<(&[u8], &str)> = vec![
            (b"", "lwpnacqdbzryxw3vhjvcj64qbznghohhhzwclnq"),
            (b"a", "czquwh3iyxbf5l3bgyugzhassmxu647ip2ike4y"),
            (b"abc", "asd4ujseh5m47pdyb46kbtsqtsgdklbhyxomuia"),
        ];

        for (input, expected) in test_cases {
            let digest = hash_in_steps(create(&HasherOptions::default()), input, 1);
            assert_eq!(base32_encode(&digest, false), expected, "input {input:?}");
        }
    }

    #[test]
    fn test_tree_matches_reference_across_leaf_boundaries() {
        let sizes = [1023, 1024, 1025, 2048, 3 * 1024, 5 * 1024 + 17, 7 * 1024, 33 * 1024 + 1];

        for size in sizes {
            let data: Vec<u8> = (0..size).map(|i| (i * 31 % 256) as u8).collect();
            let expected = reference_tth(&data);

            for step in [1usize, 100, 1024, 1500, size] {
                let actual = hash_in_steps(create(&HasherOptions::default()), &data, step);
                assert_eq!(actual, expected, "size {size}, step {step}");
            }
        }
    }

    #[test]
    fn test_digest_is_24_bytes() {
        let digest = hash_in_steps(create(&HasherOptions::default()), &[7u8; 4096], 4096);
        assert_eq!(digest.len(), 24);
    }
}
