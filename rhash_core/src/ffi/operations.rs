//! Hashing entry points for FFI
//!
//! Contexts and digests cross the boundary as raw `u64` handles. Every
//! function writes its result through an out-pointer and returns a status
//! code; out-pointers are left untouched on failure.

use crate::engine::{self, ContextHandle, DigestHandle};
use crate::ffi::helpers::{
    byte_slice, c_str_bytes, error_to_status, into_buffer, into_c_string, status_of,
    validate_mut_ptr,
};
use crate::ffi::types::{RHashBuffer, RHashStatus};
use crate::ffi_catch_panic;
use crate::format::PrintFlags;
use std::ffi::c_char;

/// Write `value` through `out` or return the error status
macro_rules! write_out {
    ($out:expr, $result:expr) => {
        match $result {
            Ok(value) => {
                unsafe { *$out = value };
                RHashStatus::Success
            }
            Err(err) => error_to_status(&err),
        }
    };
}

/// Number of registered algorithms
#[unsafe(no_mangle)]
pub extern "C" fn rhash_count(out_count: *mut usize) -> RHashStatus {
    ffi_catch_panic!({
        if !validate_mut_ptr(out_count) {
            return RHashStatus::InvalidParameter;
        }
        write_out!(out_count, engine::count())
    })
}

/// Digest size in bytes of the algorithm `hash_id`
#[unsafe(no_mangle)]
pub extern "C" fn rhash_get_digest_size(hash_id: u32, out_size: *mut usize) -> RHashStatus {
    ffi_catch_panic!({
        if !validate_mut_ptr(out_size) {
            return RHashStatus::InvalidParameter;
        }
        write_out!(out_size, engine::digest_size(hash_id))
    })
}

/// Whether `hash_id` prints as base32 by default
#[unsafe(no_mangle)]
pub extern "C" fn rhash_is_base32(hash_id: u32, out_base32: *mut bool) -> RHashStatus {
    ffi_catch_panic!({
        if !validate_mut_ptr(out_base32) {
            return RHashStatus::InvalidParameter;
        }
        write_out!(out_base32, engine::is_base32(hash_id))
    })
}

/// One-shot digest of `data[offset..offset + length]`
#[unsafe(no_mangle)]
pub extern "C" fn rhash_msg(
    hash_id: u32,
    data: *const u8,
    data_len: usize,
    offset: usize,
    length: usize,
    out_digest: *mut u64,
) -> RHashStatus {
    ffi_catch_panic!({
        if !validate_mut_ptr(out_digest) {
            return RHashStatus::InvalidParameter;
        }
        let data = match unsafe { byte_slice(data, data_len) } {
            Ok(data) => data,
            Err(status) => return status,
        };
        write_out!(
            out_digest,
            engine::msg(hash_id, data, offset, length).map(DigestHandle::as_raw)
        )
    })
}

/// Open a context for the algorithms in `hash_flags`
#[unsafe(no_mangle)]
pub extern "C" fn rhash_init(hash_flags: u32, out_context: *mut u64) -> RHashStatus {
    ffi_catch_panic!({
        if !validate_mut_ptr(out_context) {
            return RHashStatus::InvalidParameter;
        }
        write_out!(out_context, engine::init(hash_flags).map(ContextHandle::as_raw))
    })
}

/// Feed `data[offset..offset + length]` to a context
#[unsafe(no_mangle)]
pub extern "C" fn rhash_update(
    context: u64,
    data: *const u8,
    data_len: usize,
    offset: usize,
    length: usize,
) -> RHashStatus {
    ffi_catch_panic!({
        let data = match unsafe { byte_slice(data, data_len) } {
            Ok(data) => data,
            Err(status) => return status,
        };
        status_of(engine::update(
            ContextHandle::from_raw(context),
            data,
            offset,
            length,
        ))
    })
}

#[unsafe(no_mangle)]
pub extern "C" fn rhash_final(context: u64) -> RHashStatus {
    ffi_catch_panic!({ status_of(engine::finalize(ContextHandle::from_raw(context))) })
}

#[unsafe(no_mangle)]
pub extern "C" fn rhash_reset(context: u64) -> RHashStatus {
    ffi_catch_panic!({ status_of(engine::reset(ContextHandle::from_raw(context))) })
}

#[unsafe(no_mangle)]
pub extern "C" fn rhash_free(context: u64) -> RHashStatus {
    ffi_catch_panic!({ status_of(engine::free(ContextHandle::from_raw(context))) })
}

/// Store one finalized digest of a context under a new digest handle
#[unsafe(no_mangle)]
pub extern "C" fn rhash_print(context: u64, hash_id: u32, out_digest: *mut u64) -> RHashStatus {
    ffi_catch_panic!({
        if !validate_mut_ptr(out_digest) {
            return RHashStatus::InvalidParameter;
        }
        write_out!(
            out_digest,
            engine::print(ContextHandle::from_raw(context), hash_id).map(DigestHandle::as_raw)
        )
    })
}

/// Render a digest; free the buffer with `rhash_free_buffer`
#[unsafe(no_mangle)]
pub extern "C" fn rhash_print_bytes(
    digest: u64,
    print_flags: u32,
    out_buffer: *mut RHashBuffer,
) -> RHashStatus {
    ffi_catch_panic!({
        if !validate_mut_ptr(out_buffer) {
            return RHashStatus::InvalidParameter;
        }
        write_out!(
            out_buffer,
            engine::print_bytes(
                DigestHandle::from_raw(digest),
                PrintFlags::from_bits(print_flags)
            )
            .map(into_buffer)
        )
    })
}

/// Magnet link for a finalized context; free it with `rhash_free_string`
///
/// `filename` may be null. `hash_flags` selects the digests to include, zero
/// meaning every digest of the context.
#[unsafe(no_mangle)]
pub extern "C" fn rhash_print_magnet(
    context: u64,
    filename: *const c_char,
    hash_flags: u32,
    out_magnet: *mut *mut c_char,
) -> RHashStatus {
    ffi_catch_panic!({
        if !validate_mut_ptr(out_magnet) {
            return RHashStatus::InvalidParameter;
        }
        let filename = unsafe { c_str_bytes(filename) };
        write_out!(
            out_magnet,
            engine::print_magnet(ContextHandle::from_raw(context), filename, hash_flags)
                .map(into_c_string)
        )
    })
}

#[unsafe(no_mangle)]
pub extern "C" fn rhash_compare_digests(a: u64, b: u64, out_equal: *mut bool) -> RHashStatus {
    ffi_catch_panic!({
        if !validate_mut_ptr(out_equal) {
            return RHashStatus::InvalidParameter;
        }
        write_out!(
            out_equal,
            engine::compare_digests(DigestHandle::from_raw(a), DigestHandle::from_raw(b))
        )
    })
}

/// Hash code of a digest, reinterpreted as a signed 32-bit value
#[unsafe(no_mangle)]
pub extern "C" fn rhash_digest_hashcode(digest: u64, out_hash: *mut i32) -> RHashStatus {
    ffi_catch_panic!({
        if !validate_mut_ptr(out_hash) {
            return RHashStatus::InvalidParameter;
        }
        write_out!(
            out_hash,
            engine::digest_hash_code(DigestHandle::from_raw(digest)).map(|code| code as i32)
        )
    })
}

#[unsafe(no_mangle)]
pub extern "C" fn rhash_free_digest(digest: u64) -> RHashStatus {
    ffi_catch_panic!({ status_of(engine::free_digest(DigestHandle::from_raw(digest))) })
}
