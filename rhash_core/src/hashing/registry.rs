//! Central registry of hash algorithm descriptors

use super::algorithms;
use super::traits::{HasherFactory, StreamingHasher};
use super::{AlgorithmSet, HashAlgorithm, HasherOptions};
use crate::{Error, Result};
use once_cell::sync::OnceCell;
use std::collections::HashMap;
use std::fmt;

/// Immutable metadata describing one hash algorithm
pub struct AlgorithmDescriptor {
    pub algorithm: HashAlgorithm,
    /// Display name, e.g. `SHA-256`
    pub name: &'static str,
    /// Name used after `urn:` in magnet links
    pub magnet_name: &'static str,
    /// Binary digest length in bytes
    pub digest_size: usize,
    /// Whether the default text rendering is base32 rather than hex
    pub base32_default: bool,
    factory: HasherFactory,
}

impl AlgorithmDescriptor {
    /// Flag bit identifying the algorithm
    pub fn id(&self) -> u32 {
        self.algorithm.id()
    }

    /// Create hasher state initialized to the algorithm's starting state
    pub fn create_hasher(&self, options: &HasherOptions) -> Box<dyn StreamingHasher> {
        (self.factory)(options)
    }
}

impl fmt::Debug for AlgorithmDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AlgorithmDescriptor")
            .field("id", &format_args!("{:#x}", self.id()))
            .field("name", &self.name)
            .field("digest_size", &self.digest_size)
            .field("base32_default", &self.base32_default)
            .finish()
    }
}

macro_rules! descriptor {
    ($algorithm:ident, $name:literal, $magnet:literal, $size:literal, $base32:literal, $factory:path) => {
        AlgorithmDescriptor {
            algorithm: HashAlgorithm::$algorithm,
            name: $name,
            magnet_name: $magnet,
            digest_size: $size,
            base32_default: $base32,
            factory: $factory,
        }
    };
}

/// Descriptor table indexed by `HashAlgorithm as usize`
static DESCRIPTORS: [AlgorithmDescriptor; 17] = [
    descriptor!(MD5, "MD5", "md5", 16, false, algorithms::md5::create),
    descriptor!(SHA256, "SHA-256", "sha256", 32, false, algorithms::sha2::create_sha256),
    descriptor!(SHA1, "SHA1", "sha1", 20, true, algorithms::sha1::create),
    descriptor!(MD4, "MD4", "md4", 16, false, algorithms::md4::create),
    descriptor!(CRC32, "CRC32", "crc32", 4, false, algorithms::crc32::create),
    descriptor!(ED2K, "ED2K", "ed2k", 16, false, algorithms::ed2k::create),
    descriptor!(Tiger, "TIGER", "tiger", 24, false, algorithms::tiger::create),
    descriptor!(TTH, "TTH", "tree:tiger", 24, true, algorithms::tth::create),
    descriptor!(SHA224, "SHA-224", "sha224", 28, false, algorithms::sha2::create_sha224),
    descriptor!(SHA384, "SHA-384", "sha384", 48, false, algorithms::sha2::create_sha384),
    descriptor!(SHA512, "SHA-512", "sha512", 64, false, algorithms::sha2::create_sha512),
    descriptor!(SHA3_224, "SHA3-224", "sha3-224", 28, false, algorithms::sha3::create_224),
    descriptor!(SHA3_256, "SHA3-256", "sha3-256", 32, false, algorithms::sha3::create_256),
    descriptor!(SHA3_384, "SHA3-384", "sha3-384", 48, false, algorithms::sha3::create_384),
    descriptor!(SHA3_512, "SHA3-512", "sha3-512", 64, false, algorithms::sha3::create_512),
    descriptor!(BLAKE2s, "BLAKE2S", "blake2s", 32, false, algorithms::blake2::create_blake2s),
    descriptor!(BLAKE2b, "BLAKE2B", "blake2b", 64, false, algorithms::blake2::create_blake2b),
];

pub(super) fn descriptor(algorithm: HashAlgorithm) -> &'static AlgorithmDescriptor {
    &DESCRIPTORS[algorithm as usize]
}

/// Lowercase a name and drop separators so `SHA-256`, `sha_256` and `sha256`
/// compare equal
fn normalize_name(name: &str) -> String {
    name.chars()
        .filter(|c| !matches!(c, '-' | '_' | ' '))
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Read-only view over the descriptor table plus a name index
pub struct AlgorithmRegistry {
    by_name: HashMap<String, HashAlgorithm>,
}

impl AlgorithmRegistry {
    fn new() -> Self {
        let mut by_name = HashMap::new();
        for descriptor in &DESCRIPTORS {
            by_name.insert(normalize_name(descriptor.name), descriptor.algorithm);
            by_name.insert(normalize_name(descriptor.magnet_name), descriptor.algorithm);
        }
        Self { by_name }
    }

    /// Get the global registry instance
    pub fn global() -> &'static Self {
        static INSTANCE: OnceCell<AlgorithmRegistry> = OnceCell::new();
        INSTANCE.get_or_init(Self::new)
    }

    /// Number of registered algorithms
    pub fn count(&self) -> usize {
        DESCRIPTORS.len()
    }

    /// All descriptors in registration order
    pub fn iter(&self) -> impl Iterator<Item = &'static AlgorithmDescriptor> {
        DESCRIPTORS.iter()
    }

    /// Decompose a bitmask into the algorithms it selects
    ///
    /// Every set bit must name a registered algorithm and at least one bit must
    /// be set.
    pub fn resolve(&self, flags: u32) -> Result<AlgorithmSet> {
        if flags == 0 {
            return Err(Error::unknown_algorithm(0));
        }
        AlgorithmSet::from_bits(flags)
    }

    /// Descriptor for a single flag bit
    pub fn lookup(&self, id: u32) -> Result<&'static AlgorithmDescriptor> {
        HashAlgorithm::from_id(id)
            .map(descriptor)
            .ok_or_else(|| Error::unknown_algorithm(id))
    }

    /// Digest size in bytes of the algorithm with this id
    pub fn digest_size(&self, id: u32) -> Result<usize> {
        self.lookup(id).map(|descriptor| descriptor.digest_size)
    }

    /// Whether the algorithm with this id renders as base32 by default
    pub fn is_base32_default(&self, id: u32) -> Result<bool> {
        self.lookup(id).map(|descriptor| descriptor.base32_default)
    }

    /// Find an algorithm by display or magnet name, ignoring case and separators
    pub fn find_by_name(&self, name: &str) -> Option<HashAlgorithm> {
        self.by_name.get(&normalize_name(name)).copied()
    }
}
