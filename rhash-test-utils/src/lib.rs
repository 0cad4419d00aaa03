//! Test utilities for the rhash engine
//!
//! Deterministic input builders, chunk-splitting helpers and known-answer
//! vectors shared by the integration tests and benches.

pub mod builders;
pub mod chunking;
pub mod vectors;

pub use builders::{DataPattern, TestDataBuilder};
pub use chunking::{fixed_chunks, hash_chunks, hash_whole, split_at};
pub use vectors::{KNOWN_VECTORS, KnownVector};
