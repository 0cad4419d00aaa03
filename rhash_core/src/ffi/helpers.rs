//! Validation and conversion helpers for FFI

use crate::ffi::types::{RHashBuffer, RHashStatus};
use crate::{Error, ErrorKind};
use std::ffi::{CStr, CString, c_char};

/// Wrap an FFI body so that panics surface as `RHashStatus::Unknown`
#[macro_export]
macro_rules! ffi_catch_panic {
    ($($body:tt)*) => {{
        match std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| { $($body)* })) {
            Ok(status) => status,
            Err(_) => $crate::ffi::types::RHashStatus::Unknown,
        }
    }};
}

#[inline]
pub(crate) fn validate_mut_ptr<T>(ptr: *mut T) -> bool {
    !ptr.is_null()
}

/// Map an engine error onto its status code
pub(crate) fn error_to_status(error: &Error) -> RHashStatus {
    match error.kind() {
        ErrorKind::UnknownAlgorithm => RHashStatus::UnknownAlgorithm,
        ErrorKind::InvalidRange => RHashStatus::InvalidRange,
        ErrorKind::InvalidFilename => RHashStatus::InvalidFilename,
        ErrorKind::AlreadyFinalized => RHashStatus::AlreadyFinalized,
        ErrorKind::NotFinalized => RHashStatus::NotFinalized,
        ErrorKind::InvalidHandle => RHashStatus::InvalidHandle,
        ErrorKind::NotInitialized => RHashStatus::NotInitialized,
        ErrorKind::HandleLimitExceeded => RHashStatus::HandleLimit,
        ErrorKind::Internal => RHashStatus::Internal,
    }
}

/// Status of a result whose value has already been written out
pub(crate) fn status_of<T>(result: crate::Result<T>) -> RHashStatus {
    match result {
        Ok(_) => RHashStatus::Success,
        Err(err) => error_to_status(&err),
    }
}

/// Borrow a caller buffer of `len` bytes
///
/// A null pointer is accepted only for an empty buffer.
///
/// # Safety
///
/// A non-null `data` must point to `len` readable bytes that stay valid for
/// the returned lifetime.
pub(crate) unsafe fn byte_slice<'a>(data: *const u8, len: usize) -> Result<&'a [u8], RHashStatus> {
    if data.is_null() {
        return if len == 0 {
            Ok(&[])
        } else {
            Err(RHashStatus::InvalidParameter)
        };
    }
    Ok(unsafe { std::slice::from_raw_parts(data, len) })
}

/// Borrow the bytes of an optional NUL-terminated string
///
/// # Safety
///
/// A non-null `s` must point to a NUL-terminated string.
pub(crate) unsafe fn c_str_bytes<'a>(s: *const c_char) -> Option<&'a [u8]> {
    if s.is_null() {
        None
    } else {
        Some(unsafe { CStr::from_ptr(s) }.to_bytes())
    }
}

/// Hand a byte vector over to the caller
pub(crate) fn into_buffer(bytes: Vec<u8>) -> RHashBuffer {
    let len = bytes.len();
    let data = Box::into_raw(bytes.into_boxed_slice()) as *mut u8;
    RHashBuffer { data, len }
}

/// Hand a string over to the caller; interior NULs yield null
pub(crate) fn into_c_string(text: String) -> *mut c_char {
    CString::new(text)
        .map(CString::into_raw)
        .unwrap_or(std::ptr::null_mut())
}
