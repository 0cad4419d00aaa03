//! Process-wide handle surface
//!
//! Contexts and digests created here live in two global handle tables and are
//! addressed by opaque, generational handles. Every entry point fails with
//! `NotInitialized` until [`library_init`] has run.
//!
//! Each table entry sits behind its own `Arc<Mutex<_>>`, so operations on
//! different contexts only share the brief table lookup.

use crate::error::{InternalError, StateError};
use crate::format::PrintFlags;
use crate::format::magnet::filename_from_bytes;
use crate::hashing::{AlgorithmRegistry, AlgorithmSet, Digest, HashContext};
use crate::{EngineConfig, Error, Result};
use handles::HandleTable;
use log::{debug, trace, warn};
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, RwLock, RwLockReadGuard, RwLockWriteGuard};

mod handles;

lazy_static::lazy_static! {
    static ref CONTEXTS: RwLock<HandleTable<Arc<Mutex<HashContext>>>> =
        RwLock::new(HandleTable::new("context"));
    static ref DIGESTS: RwLock<HandleTable<Arc<Digest>>> = RwLock::new(HandleTable::new("digest"));
    static ref CONFIG: RwLock<EngineConfig> = RwLock::new(EngineConfig::default());
}

static INITIALIZED: AtomicBool = AtomicBool::new(false);

/// Opaque reference to a context in the global table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContextHandle(u64);

/// Opaque reference to a digest in the global table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DigestHandle(u64);

macro_rules! raw_handle {
    ($name:ident) => {
        impl $name {
            /// Wrap a value previously returned by [`Self::as_raw`]
            pub const fn from_raw(raw: u64) -> Self {
                Self(raw)
            }

            pub const fn as_raw(self) -> u64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{:#x}", self.0)
            }
        }
    };
}

raw_handle!(ContextHandle);
raw_handle!(DigestHandle);

/// Number of live handles per table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HandleCounts {
    pub contexts: usize,
    pub digests: usize,
}

fn read<'a, T>(lock: &'a RwLock<T>, resource: &'static str) -> Result<RwLockReadGuard<'a, T>> {
    lock.read()
        .map_err(|_| Error::from(InternalError::lock_poisoned(resource)))
}

fn write<'a, T>(lock: &'a RwLock<T>, resource: &'static str) -> Result<RwLockWriteGuard<'a, T>> {
    lock.write()
        .map_err(|_| Error::from(InternalError::lock_poisoned(resource)))
}

fn ensure_initialized() -> Result<()> {
    if INITIALIZED.load(Ordering::Acquire) {
        Ok(())
    } else {
        Err(StateError::NotInitialized.into())
    }
}

/// Read guard on the configuration, taken only while the engine is initialized
///
/// Cleanup needs the write side of the same lock, so it cannot release the
/// tables while a caller holding this guard inserts into them.
fn live_config() -> Result<RwLockReadGuard<'static, EngineConfig>> {
    let config = read(&CONFIG, "engine config")?;
    ensure_initialized()?;
    Ok(config)
}

/// Initialize the engine with default configuration
///
/// Idempotent; a second call leaves the running configuration untouched.
pub fn library_init() -> Result<()> {
    library_init_with_config(EngineConfig::default())
}

/// Initialize the engine, applying `config` if this is the first call
pub fn library_init_with_config(config: EngineConfig) -> Result<()> {
    let mut current = write(&CONFIG, "engine config")?;
    if INITIALIZED.load(Ordering::Acquire) {
        debug!("Engine already initialized, ignoring configuration {config:?}");
        return Ok(());
    }

    write(&CONTEXTS, "context table")?.set_limit(config.max_contexts);
    write(&DIGESTS, "digest table")?.set_limit(config.max_digests);
    let algorithms = AlgorithmRegistry::global().count();

    *current = config;
    INITIALIZED.store(true, Ordering::Release);
    debug!("Engine initialized with {algorithms} algorithms: {:?}", *current);
    Ok(())
}

/// Release every handle and return to the uninitialized state
pub fn library_cleanup() -> Result<()> {
    let mut config = write(&CONFIG, "engine config")?;
    if !INITIALIZED.swap(false, Ordering::AcqRel) {
        return Ok(());
    }

    let contexts = {
        let mut table = write(&CONTEXTS, "context table")?;
        let live = table.len();
        table.clear();
        live
    };
    let digests = {
        let mut table = write(&DIGESTS, "digest table")?;
        let live = table.len();
        table.clear();
        live
    };
    *config = EngineConfig::default();

    debug!("Engine cleaned up, released {contexts} contexts and {digests} digests");
    Ok(())
}

pub fn is_initialized() -> bool {
    INITIALIZED.load(Ordering::Acquire)
}

/// Configuration the engine was initialized with
pub fn config() -> Result<EngineConfig> {
    ensure_initialized()?;
    Ok(read(&CONFIG, "engine config")?.clone())
}

/// Number of registered algorithms
pub fn count() -> Result<usize> {
    ensure_initialized()?;
    Ok(AlgorithmRegistry::global().count())
}

/// Digest size in bytes of the algorithm `id`
pub fn digest_size(id: u32) -> Result<usize> {
    ensure_initialized()?;
    AlgorithmRegistry::global().digest_size(id)
}

/// Whether the algorithm `id` prints as base32 by default
pub fn is_base32(id: u32) -> Result<bool> {
    ensure_initialized()?;
    AlgorithmRegistry::global().is_base32_default(id)
}

/// Live handle counts, mostly useful for leak checks
pub fn handle_counts() -> Result<HandleCounts> {
    ensure_initialized()?;
    Ok(HandleCounts {
        contexts: read(&CONTEXTS, "context table")?.len(),
        digests: read(&DIGESTS, "digest table")?.len(),
    })
}

fn context_entry(handle: ContextHandle) -> Result<Arc<Mutex<HashContext>>> {
    ensure_initialized()?;
    read(&CONTEXTS, "context table")?
        .get(handle.0)
        .cloned()
        .inspect_err(|_| warn!("Rejected context handle {handle}"))
}

fn with_context<R>(
    handle: ContextHandle,
    operation: impl FnOnce(&mut HashContext) -> Result<R>,
) -> Result<R> {
    let entry = context_entry(handle)?;
    let mut context = entry
        .lock()
        .map_err(|_| Error::from(InternalError::lock_poisoned("hash context")))?;
    operation(&mut context)
}

fn digest_entry(handle: DigestHandle) -> Result<Arc<Digest>> {
    ensure_initialized()?;
    read(&DIGESTS, "digest table")?
        .get(handle.0)
        .cloned()
        .inspect_err(|_| warn!("Rejected digest handle {handle}"))
}

fn store_digest(digest: Digest) -> Result<DigestHandle> {
    let raw = write(&DIGESTS, "digest table")?.insert(Arc::new(digest))?;
    Ok(DigestHandle(raw))
}

/// Hash `data[offset..offset + length]` with the single algorithm `id`
pub fn msg(id: u32, data: &[u8], offset: usize, length: usize) -> Result<DigestHandle> {
    let config = live_config()?;
    let algorithm = AlgorithmRegistry::global().lookup(id)?.algorithm;
    let mut context = HashContext::with_options(algorithm.into(), config.hasher_options())?;
    context.update_range(data, offset, length)?;

    let digest = context.into_digests().pop().ok_or_else(|| {
        Error::from(InternalError::assertion("single-algorithm context produced no digest"))
    })?;
    store_digest(digest)
}

/// Open a context computing every algorithm in `flags`
pub fn init(flags: u32) -> Result<ContextHandle> {
    let config = live_config()?;
    // Resolution happens before anything is stored
    let context = HashContext::from_mask(flags, config.hasher_options())?;
    let raw = write(&CONTEXTS, "context table")?.insert(Arc::new(Mutex::new(context)))?;
    let handle = ContextHandle(raw);
    debug!("Opened context {handle} for algorithms {flags:#x}");
    Ok(handle)
}

/// Feed `data[offset..offset + length]` to the context
pub fn update(handle: ContextHandle, data: &[u8], offset: usize, length: usize) -> Result<()> {
    with_context(handle, |context| {
        context.update_range(data, offset, length)?;
        trace!("Context {handle} consumed {length} bytes");
        Ok(())
    })
}

/// Finalize the context; repeated calls are no-ops
pub fn finalize(handle: ContextHandle) -> Result<()> {
    with_context(handle, |context| {
        context.finalize();
        Ok(())
    })
}

/// Return the context to its freshly opened state
pub fn reset(handle: ContextHandle) -> Result<()> {
    with_context(handle, |context| {
        context.reset();
        debug!("Reset context {handle}");
        Ok(())
    })
}

/// Release the context; the handle becomes invalid
pub fn free(handle: ContextHandle) -> Result<()> {
    ensure_initialized()?;
    write(&CONTEXTS, "context table")?
        .remove(handle.0)
        .inspect_err(|_| warn!("Rejected context handle {handle}"))?;
    debug!("Freed context {handle}");
    Ok(())
}

/// Copy one finalized digest of the context into its own handle
///
/// `id` zero selects the lowest-id algorithm of the context.
pub fn print(handle: ContextHandle, id: u32) -> Result<DigestHandle> {
    let _config = live_config()?;
    let selector = AlgorithmSet::from_bits(id)?;
    let digest = with_context(handle, |context| context.select(selector).cloned())?;
    store_digest(digest)
}

/// Render a stored digest
pub fn print_bytes(handle: DigestHandle, flags: PrintFlags) -> Result<Vec<u8>> {
    Ok(digest_entry(handle)?.print_bytes(flags))
}

/// Render one digest of a finalized context without storing it
pub fn print_context_bytes(handle: ContextHandle, id: u32, flags: PrintFlags) -> Result<Vec<u8>> {
    ensure_initialized()?;
    let selector = AlgorithmSet::from_bits(id)?;
    with_context(handle, |context| context.print_bytes(selector, flags))
}

/// Magnet link over the digests in `mask`, including the message length
pub fn print_magnet(handle: ContextHandle, filename: Option<&[u8]>, mask: u32) -> Result<String> {
    print_magnet_with_flags(handle, filename, mask, PrintFlags::FILESIZE)
}

/// Magnet link with explicit print flags
pub fn print_magnet_with_flags(
    handle: ContextHandle,
    filename: Option<&[u8]>,
    mask: u32,
    flags: PrintFlags,
) -> Result<String> {
    ensure_initialized()?;
    let filename = filename.map(filename_from_bytes).transpose()?;
    let mask = AlgorithmSet::from_bits(mask)?;
    with_context(handle, |context| context.print_magnet(filename, mask, flags))
}

/// Whether two stored digests are equal
pub fn compare_digests(a: DigestHandle, b: DigestHandle) -> Result<bool> {
    let left = digest_entry(a)?;
    let right = digest_entry(b)?;
    Ok(left.equals(&right))
}

/// Hash code of a stored digest
pub fn digest_hash_code(handle: DigestHandle) -> Result<u32> {
    Ok(digest_entry(handle)?.hash_code())
}

/// Owned copy of a stored digest
pub fn digest(handle: DigestHandle) -> Result<Digest> {
    Ok(digest_entry(handle)?.as_ref().clone())
}

/// Release a stored digest
pub fn free_digest(handle: DigestHandle) -> Result<()> {
    ensure_initialized()?;
    write(&DIGESTS, "digest table")?
        .remove(handle.0)
        .inspect_err(|_| warn!("Rejected digest handle {handle}"))?;
    Ok(())
}
