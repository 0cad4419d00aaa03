//! RHash Core Library
//!
//! Multi-algorithm streaming hash engine. A single pass over the input feeds
//! any combination of the registered algorithms (MD5, SHA family, SHA3,
//! BLAKE2, MD4, ED2K, Tiger, TTH, CRC32); finalized digests render as hex,
//! base32, base64 or magnet links.
//!
//! The engine is reachable three ways: the owned [`HashContext`] API, the
//! handle-based [`engine`] module backed by process-wide tables, and the C
//! ABI in [`ffi`].
//!
//! ```
//! use rhash_core::{HashAlgorithm, HashContext, PrintFlags};
//!
//! let mut context = HashContext::new(HashAlgorithm::MD5 | HashAlgorithm::SHA256)?;
//! context.update(b"abc")?;
//! context.finalize();
//!
//! let md5 = context.digest(HashAlgorithm::MD5)?;
//! assert_eq!(md5.to_text(PrintFlags::DEFAULT), "900150983cd24fb0d6963f7d28e17f72");
//! # Ok::<(), rhash_core::Error>(())
//! ```

pub mod engine;
pub mod error;
pub mod ffi;
pub mod format;
pub mod hashing;

pub use engine::{ContextHandle, DigestHandle, HandleCounts};
pub use error::{Error, ErrorKind, Result};
pub use format::{Encoding, PrintFlags, url_encode};
pub use hashing::{
    AlgorithmDescriptor, AlgorithmRegistry, AlgorithmSet, ContextStatus, Digest, Ed2kVariant,
    HashAlgorithm, HashContext, HasherOptions, StreamingHasher, msg,
};

/// Engine configuration applied by [`engine::library_init_with_config`]
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// ED2K variant used by contexts opened through the handle surface
    pub ed2k_variant: Ed2kVariant,
    /// Maximum number of live context handles, `0` for unbounded
    pub max_contexts: usize,
    /// Maximum number of live digest handles, `0` for unbounded
    pub max_digests: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            ed2k_variant: Ed2kVariant::Red,
            max_contexts: 0,
            max_digests: 0,
        }
    }
}

impl EngineConfig {
    pub fn hasher_options(&self) -> HasherOptions {
        HasherOptions {
            ed2k_variant: self.ed2k_variant,
        }
    }
}
