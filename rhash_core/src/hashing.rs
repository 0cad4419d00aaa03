//! Hash algorithm selection and streaming computation
//!
//! Algorithms are identified by a single flag bit so that a set of them can be
//! selected with one bitmask and computed together over a single pass of the
//! input.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{BitOr, BitOrAssign};

mod algorithms;
mod context;
mod digest;
mod registry;
mod traits;

pub use context::{ContextStatus, HashContext, msg};
pub use digest::Digest;
pub use registry::{AlgorithmDescriptor, AlgorithmRegistry};
pub use traits::StreamingHasher;

/// Hash algorithms supported by the engine, in registration order
#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum HashAlgorithm {
    MD5 = 0,
    SHA256 = 1,
    SHA1 = 2,
    MD4 = 3,
    CRC32 = 4,
    ED2K = 5,
    Tiger = 6,
    TTH = 7,
    SHA224 = 8,
    SHA384 = 9,
    SHA512 = 10,
    SHA3_224 = 11,
    SHA3_256 = 12,
    SHA3_384 = 13,
    SHA3_512 = 14,
    BLAKE2s = 15,
    BLAKE2b = 16,
}

impl HashAlgorithm {
    /// Every algorithm, in ascending id order
    pub const ALL: [HashAlgorithm; 17] = [
        HashAlgorithm::MD5,
        HashAlgorithm::SHA256,
        HashAlgorithm::SHA1,
        HashAlgorithm::MD4,
        HashAlgorithm::CRC32,
        HashAlgorithm::ED2K,
        HashAlgorithm::Tiger,
        HashAlgorithm::TTH,
        HashAlgorithm::SHA224,
        HashAlgorithm::SHA384,
        HashAlgorithm::SHA512,
        HashAlgorithm::SHA3_224,
        HashAlgorithm::SHA3_256,
        HashAlgorithm::SHA3_384,
        HashAlgorithm::SHA3_512,
        HashAlgorithm::BLAKE2s,
        HashAlgorithm::BLAKE2b,
    ];

    /// Flag bit identifying this algorithm
    pub const fn id(self) -> u32 {
        1 << (self as u8)
    }

    /// Look up the algorithm owning exactly this flag bit
    pub fn from_id(id: u32) -> Option<Self> {
        if !id.is_power_of_two() {
            return None;
        }
        Self::ALL.get(id.trailing_zeros() as usize).copied()
    }

    /// Static metadata for this algorithm
    pub fn descriptor(self) -> &'static AlgorithmDescriptor {
        registry::descriptor(self)
    }

    /// Size of the binary digest in bytes
    pub fn digest_size(self) -> usize {
        self.descriptor().digest_size
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.descriptor().name)
    }
}

impl std::str::FromStr for HashAlgorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        AlgorithmRegistry::global()
            .find_by_name(s)
            .ok_or_else(|| Error::unknown_algorithm(0))
    }
}

/// A set of algorithms, stored as the union of their flag bits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct AlgorithmSet(u32);

impl AlgorithmSet {
    /// No algorithms
    pub const EMPTY: AlgorithmSet = AlgorithmSet(0);

    /// Every registered algorithm
    pub const ALL: AlgorithmSet = AlgorithmSet((1 << HashAlgorithm::ALL.len()) - 1);

    /// Build a set from raw flag bits, rejecting bits without an algorithm
    pub fn from_bits(bits: u32) -> Result<Self> {
        let unknown = bits & !Self::ALL.0;
        if unknown != 0 {
            // Report the lowest offending bit so the caller can pinpoint it
            return Err(Error::unknown_algorithm(1 << unknown.trailing_zeros()));
        }
        Ok(Self(bits))
    }

    /// Raw flag bits
    pub const fn bits(self) -> u32 {
        self.0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    pub const fn contains(self, algorithm: HashAlgorithm) -> bool {
        self.0 & algorithm.id() != 0
    }

    /// True when every algorithm of `other` is also in `self`
    pub const fn is_superset(self, other: AlgorithmSet) -> bool {
        other.0 & !self.0 == 0
    }

    pub fn insert(&mut self, algorithm: HashAlgorithm) {
        self.0 |= algorithm.id();
    }

    /// The only algorithm of a one-element set
    pub fn single(self) -> Option<HashAlgorithm> {
        HashAlgorithm::from_id(self.0)
    }

    /// The algorithm with the lowest id
    pub fn first(self) -> Option<HashAlgorithm> {
        self.iter().next()
    }

    /// Iterate in ascending id order
    pub fn iter(self) -> impl Iterator<Item = HashAlgorithm> {
        HashAlgorithm::ALL
            .into_iter()
            .filter(move |algorithm| self.contains(*algorithm))
    }
}

impl From<HashAlgorithm> for AlgorithmSet {
    fn from(algorithm: HashAlgorithm) -> Self {
        Self(algorithm.id())
    }
}

impl FromIterator<HashAlgorithm> for AlgorithmSet {
    fn from_iter<I: IntoIterator<Item = HashAlgorithm>>(iter: I) -> Self {
        let mut set = AlgorithmSet::EMPTY;
        for algorithm in iter {
            set.insert(algorithm);
        }
        set
    }
}

impl BitOr for AlgorithmSet {
    type Output = AlgorithmSet;

    fn bitor(self, rhs: AlgorithmSet) -> AlgorithmSet {
        AlgorithmSet(self.0 | rhs.0)
    }
}

impl BitOr<HashAlgorithm> for AlgorithmSet {
    type Output = AlgorithmSet;

    fn bitor(self, rhs: HashAlgorithm) -> AlgorithmSet {
        AlgorithmSet(self.0 | rhs.id())
    }
}

impl BitOr for HashAlgorithm {
    type Output = AlgorithmSet;

    fn bitor(self, rhs: HashAlgorithm) -> AlgorithmSet {
        AlgorithmSet(self.id() | rhs.id())
    }
}

impl BitOrAssign<HashAlgorithm> for AlgorithmSet {
    fn bitor_assign(&mut self, rhs: HashAlgorithm) {
        self.insert(rhs);
    }
}

/// ED2K hash variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Ed2kVariant {
    /// Blue variant: never hashes a trailing empty chunk
    Blue,
    /// Red variant: appends MD4 of empty data when the input length is an exact
    /// multiple of the chunk size
    #[default]
    Red,
}

impl std::str::FromStr for Ed2kVariant {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "red" => Ok(Ed2kVariant::Red),
            "blue" => Ok(Ed2kVariant::Blue),
            other => Err(format!("unknown ED2K variant '{other}'")),
        }
    }
}

/// Per-algorithm tuning passed to hasher factories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HasherOptions {
    pub ed2k_variant: Ed2kVariant,
}
