//! Hash context: the streaming state machine shared by all algorithms

use super::registry::AlgorithmDescriptor;
use super::{AlgorithmRegistry, AlgorithmSet, Digest, HashAlgorithm, HasherOptions, StreamingHasher};
use crate::error::{InternalError, StateError};
use crate::format::{self, PrintFlags};
use crate::{Error, Result};
use log::{debug, trace};
use std::fmt;
use std::ops::Range;

/// Lifecycle position of a [`HashContext`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextStatus {
    /// Freshly opened or reset, no data fed yet
    Open,
    /// At least one update call accepted
    Updating,
    /// Digests produced, updates rejected
    Finalized,
}

/// Running state of one selected algorithm
struct Lane {
    descriptor: &'static AlgorithmDescriptor,
    hasher: Box<dyn StreamingHasher>,
}

impl Lane {
    fn finish(self, message_length: u64) -> Digest {
        Digest::new(
            self.descriptor.algorithm,
            self.hasher.finalize(),
            message_length,
        )
    }
}

/// Computes one or more digests over a single stream of bytes
///
/// Lanes are kept in ascending id order and fed in that order. Once finalized
/// the lanes are consumed and only the digests remain until [`reset`].
///
/// [`reset`]: HashContext::reset
pub struct HashContext {
    algorithms: AlgorithmSet,
    options: HasherOptions,
    lanes: Vec<Lane>,
    digests: Option<Vec<Digest>>,
    message_length: u64,
    updated: bool,
}

/// Validate `offset..offset + length` against a buffer of `available` bytes
pub(crate) fn checked_range(available: usize, offset: usize, length: usize) -> Result<Range<usize>> {
    offset
        .checked_add(length)
        .filter(|end| *end <= available)
        .map(|end| offset..end)
        .ok_or_else(|| Error::invalid_range(offset, length, available))
}

fn build_lanes(algorithms: AlgorithmSet, options: &HasherOptions) -> Vec<Lane> {
    algorithms
        .iter()
        .map(|algorithm| {
            let descriptor = algorithm.descriptor();
            Lane {
                descriptor,
                hasher: descriptor.create_hasher(options),
            }
        })
        .collect()
}

impl HashContext {
    /// Open a context computing every algorithm in `algorithms`
    pub fn new(algorithms: AlgorithmSet) -> Result<Self> {
        Self::with_options(algorithms, HasherOptions::default())
    }

    /// Open a context with explicit per-algorithm options
    pub fn with_options(algorithms: AlgorithmSet, options: HasherOptions) -> Result<Self> {
        if algorithms.is_empty() {
            return Err(Error::unknown_algorithm(0));
        }

        debug!(
            "Opening hash context for {} algorithm(s), mask {:#x}",
            algorithms.len(),
            algorithms.bits()
        );

        Ok(Self {
            algorithms,
            options,
            lanes: build_lanes(algorithms, &options),
            digests: None,
            message_length: 0,
            updated: false,
        })
    }

    /// Open a context from raw flag bits
    pub fn from_mask(flags: u32, options: HasherOptions) -> Result<Self> {
        let algorithms = AlgorithmRegistry::global().resolve(flags)?;
        Self::with_options(algorithms, options)
    }

    /// Algorithms selected when the context was opened
    pub fn algorithms(&self) -> AlgorithmSet {
        self.algorithms
    }

    pub fn options(&self) -> HasherOptions {
        self.options
    }

    pub fn status(&self) -> ContextStatus {
        if self.digests.is_some() {
            ContextStatus::Finalized
        } else if self.updated {
            ContextStatus::Updating
        } else {
            ContextStatus::Open
        }
    }

    pub fn is_finalized(&self) -> bool {
        self.digests.is_some()
    }

    /// Total bytes fed since open or the last reset
    pub fn message_length(&self) -> u64 {
        self.message_length
    }

    /// Feed a chunk of the message through every selected algorithm
    pub fn update(&mut self, data: &[u8]) -> Result<()> {
        if self.is_finalized() {
            return Err(StateError::AlreadyFinalized.into());
        }

        trace!("Updating hash context with {} bytes", data.len());

        for lane in &mut self.lanes {
            lane.hasher.update(data);
        }
        self.message_length += data.len() as u64;
        self.updated = true;
        Ok(())
    }

    /// Feed `data[offset..offset + length]`
    pub fn update_range(&mut self, data: &[u8], offset: usize, length: usize) -> Result<()> {
        let range = checked_range(data.len(), offset, length)?;
        self.update(&data[range])
    }

    /// Finish every algorithm and return the digests in ascending id order
    ///
    /// Calling it again returns the same digests.
    pub fn finalize(&mut self) -> &[Digest] {
        let message_length = self.message_length;
        let lanes = &mut self.lanes;
        self.digests.get_or_insert_with(|| {
            debug!("Finalizing hash context after {message_length} bytes");
            std::mem::take(lanes)
                .into_iter()
                .map(|lane| lane.finish(message_length))
                .collect()
        })
    }

    /// Finalize and take ownership of the digests
    pub fn into_digests(mut self) -> Vec<Digest> {
        self.finalize();
        self.digests.take().unwrap_or_default()
    }

    /// Discard all state and digests, keeping the algorithm selection
    pub fn reset(&mut self) {
        debug!("Resetting hash context, mask {:#x}", self.algorithms.bits());
        self.lanes = build_lanes(self.algorithms, &self.options);
        self.digests = None;
        self.message_length = 0;
        self.updated = false;
    }

    /// All digests, in ascending id order
    pub fn digests(&self) -> Result<&[Digest]> {
        self.digests
            .as_deref()
            .ok_or_else(|| StateError::NotFinalized.into())
    }

    /// Digest of one selected algorithm
    pub fn digest(&self, algorithm: HashAlgorithm) -> Result<&Digest> {
        self.digests()?
            .iter()
            .find(|digest| digest.algorithm() == algorithm)
            .ok_or_else(|| Error::unknown_algorithm(algorithm.id()))
    }

    /// Pick the digest named by `selector`
    ///
    /// An empty selector picks the lowest-id algorithm of the context; any
    /// other selector must name exactly one algorithm of the context.
    pub fn select(&self, selector: AlgorithmSet) -> Result<&Digest> {
        let digests = self.digests()?;
        if selector.is_empty() {
            return digests.first().ok_or_else(|| {
                Error::Internal(InternalError::assertion("finalized context without digests"))
            });
        }
        let algorithm = selector
            .single()
            .ok_or_else(|| Error::unknown_algorithm(selector.bits()))?;
        self.digest(algorithm)
    }

    /// Render one digest of the context
    pub fn print_bytes(&self, selector: AlgorithmSet, flags: PrintFlags) -> Result<Vec<u8>> {
        self.select(selector)
            .map(|digest| format::print_digest(digest, flags))
    }

    /// Build a magnet link from the digests of `mask` (all digests if empty)
    pub fn print_magnet(
        &self,
        filename: Option<&str>,
        mask: AlgorithmSet,
        flags: PrintFlags,
    ) -> Result<String> {
        format::magnet::print_magnet(self, filename, mask, flags)
    }
}

impl fmt::Debug for HashContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashContext")
            .field("algorithms", &format_args!("{:#x}", self.algorithms.bits()))
            .field("status", &self.status())
            .field("message_length", &self.message_length)
            .finish()
    }
}

/// Hash `data[offset..offset + length]` with a single algorithm in one call
pub fn msg(algorithm: HashAlgorithm, data: &[u8], offset: usize, length: usize) -> Result<Digest> {
    let range = checked_range(data.len(), offset, length)?;
    let mut context = HashContext::new(algorithm.into())?;
    context.update(&data[range])?;
    context.into_digests().pop().ok_or_else(|| {
        Error::Internal(InternalError::assertion("single-algorithm context produced no digest"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use proptest::prelude::*;

    fn md5_sha256() -> HashContext {
        HashContext::new(HashAlgorithm::MD5 | HashAlgorithm::SHA256).unwrap()
    }

    #[test]
    fn test_concrete_two_algorithm_scenario() {
        let mut context = HashContext::from_mask(0x1 | 0x2, HasherOptions::default()).unwrap();
        context.update(b"abc").unwrap();
        let digests = context.finalize();

        assert_eq!(digests.len(), 2);
        assert_eq!(digests[0].id(), 1);
        assert_eq!(digests[0].len(), 16);
        assert_eq!(digests[1].id(), 2);
        assert_eq!(digests[1].len(), 32);
        assert_eq!(hex::encode(digests[0].as_bytes()), "900150983cd24fb0d6963f7d28e17f72");
    }

    #[test]
    fn test_status_transitions() {
        let mut context = md5_sha256();
        assert_eq!(context.status(), ContextStatus::Open);

        context.update(b"").unwrap();
        assert_eq!(context.status(), ContextStatus::Updating);

        context.finalize();
        assert_eq!(context.status(), ContextStatus::Finalized);

        context.reset();
        assert_eq!(context.status(), ContextStatus::Open);
        assert_eq!(context.message_length(), 0);
    }

    #[test]
    fn test_update_after_finalize_fails() {
        let mut context = md5_sha256();
        context.finalize();

        let err = context.update(b"more").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::AlreadyFinalized);
    }

    #[test]
    fn test_invalid_range() {
        let mut context = md5_sha256();
        let err = context.update_range(b"12345", 3, 10).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidRange);

        let err = context.update_range(b"12345", usize::MAX, 2).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidRange);

        // Rejected ranges leave the context untouched
        assert_eq!(context.status(), ContextStatus::Open);

        context.update_range(b"12345", 5, 0).unwrap();
        context.update_range(b"12345", 1, 3).unwrap();
        assert_eq!(context.message_length(), 3);
    }

    #[test]
    fn test_update_range_matches_slice_update() {
        let data = b"xxabcyy";
        let mut ranged = md5_sha256();
        ranged.update_range(data, 2, 3).unwrap();

        let mut direct = md5_sha256();
        direct.update(b"abc").unwrap();

        assert_eq!(ranged.finalize(), direct.finalize());
    }

    #[test]
    fn test_finalize_is_idempotent() {
        let mut context = md5_sha256();
        context.update(b"hello").unwrap();
        let first = context.finalize().to_vec();
        let second = context.finalize().to_vec();
        assert_eq!(first, second);
    }

    #[test]
    fn test_reset_matches_fresh_context() {
        let mut reused = md5_sha256();
        reused.update(b"something else entirely").unwrap();
        reused.finalize();
        reused.reset();
        reused.update(b"payload").unwrap();

        let mut fresh = md5_sha256();
        fresh.update(b"payload").unwrap();

        assert_eq!(reused.finalize(), fresh.finalize());
    }

    #[test]
    fn test_digests_require_finalize() {
        let context = md5_sha256();
        assert_eq!(context.digests().unwrap_err().kind(), ErrorKind::NotFinalized);
        assert_eq!(
            context.digest(HashAlgorithm::MD5).unwrap_err().kind(),
            ErrorKind::NotFinalized
        );
    }

    #[test]
    fn test_select_digest() {
        let mut context = md5_sha256();
        context.finalize();

        assert_eq!(
            context.select(AlgorithmSet::EMPTY).unwrap().algorithm(),
            HashAlgorithm::MD5
        );
        assert_eq!(
            context
                .select(HashAlgorithm::SHA256.into())
                .unwrap()
                .algorithm(),
            HashAlgorithm::SHA256
        );
        assert_eq!(
            context.select(HashAlgorithm::SHA1.into()).unwrap_err().kind(),
            ErrorKind::UnknownAlgorithm
        );
        assert_eq!(
            context
                .select(HashAlgorithm::MD5 | HashAlgorithm::SHA256)
                .unwrap_err()
                .kind(),
            ErrorKind::UnknownAlgorithm
        );
    }

    #[test]
    fn test_empty_selection_is_rejected() {
        let err = HashContext::new(AlgorithmSet::EMPTY).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownAlgorithm);

        let err = HashContext::from_mask(0x1 | (1 << 30), HasherOptions::default()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownAlgorithm);
    }

    #[test]
    fn test_digest_sizes_match_registry() {
        let mut context = HashContext::new(AlgorithmSet::ALL).unwrap();
        context.update(b"The quick brown fox jumps over the lazy dog").unwrap();

        for digest in context.finalize() {
            assert_eq!(digest.len(), digest.algorithm().digest_size(), "{}", digest.algorithm());
            assert_eq!(digest.message_length(), 43);
        }
    }

    #[test]
    fn test_msg_one_shot() {
        let digest = msg(HashAlgorithm::SHA1, b"--abc--", 2, 3).unwrap();
        assert_eq!(hex::encode(digest.as_bytes()), "a9993e364706816aba3e25717850c26c9cd0d89d");

        let err = msg(HashAlgorithm::SHA1, b"abcde", 3, 10).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidRange);
    }

    proptest! {
        #[test]
        fn test_chunking_invariance(
            data in proptest::collection::vec(any::<u8>(), 0..5000),
            cuts in proptest::collection::vec(any::<prop::sample::Index>(), 0..8),
        ) {
            let mut points: Vec<usize> = cuts.iter().map(|cut| cut.index(data.len() + 1)).collect();
            points.sort_unstable();

            let mut whole = HashContext::new(AlgorithmSet::ALL).unwrap();
            whole.update(&data).unwrap();

            let mut pieces = HashContext::new(AlgorithmSet::ALL).unwrap();
            let mut start = 0;
            for point in points {
                pieces.update(&data[start..point]).unwrap();
                start = point;
            }
            pieces.update(&data[start..]).unwrap();

            prop_assert_eq!(whole.finalize(), pieces.finalize());
        }
    }
}
