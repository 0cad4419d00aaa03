//! C ABI for the rhash engine
//!
//! Thin wrappers over [`crate::engine`]: contexts and digests are passed as
//! raw `u64` handles and every call reports a [`RHashStatus`].
//!
//! # Safety
//!
//! - Null out-pointers are rejected with `InvalidParameter`
//! - Input buffers may be null only when their length is zero
//! - Panics are caught at the boundary and reported as `Unknown`
//! - Buffers and strings returned by the library must be released with
//!   `rhash_free_buffer` / `rhash_free_string`

#![allow(clippy::not_unsafe_ptr_arg_deref)]

pub mod helpers;
pub mod memory;
pub mod operations;
pub mod results;
pub mod types;

pub use memory::*;
pub use operations::*;
pub use results::*;
pub use types::*;

pub(crate) use crate::ffi_catch_panic;

use crate::engine;
use helpers::status_of;
use std::ffi::c_char;

const VERSION_STRING: &str = concat!(env!("CARGO_PKG_VERSION"), "\0");

/// Initialize the library; safe to call more than once
#[unsafe(no_mangle)]
pub extern "C" fn rhash_library_init() -> RHashStatus {
    ffi_catch_panic!({ status_of(engine::library_init()) })
}

/// Release every handle and return to the uninitialized state
#[unsafe(no_mangle)]
pub extern "C" fn rhash_library_cleanup() -> RHashStatus {
    ffi_catch_panic!({ status_of(engine::library_cleanup()) })
}

/// Static, NUL-terminated library version
#[unsafe(no_mangle)]
pub extern "C" fn rhash_get_version() -> *const c_char {
    VERSION_STRING.as_ptr() as *const c_char
}
