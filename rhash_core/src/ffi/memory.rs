//! Release of library-owned memory handed out through FFI

use crate::ffi::helpers::validate_mut_ptr;
use crate::ffi::types::RHashBuffer;
use std::ffi::{CString, c_char};
use std::panic::{AssertUnwindSafe, catch_unwind};

/// Free a buffer returned by `rhash_print_bytes`
#[unsafe(no_mangle)]
pub extern "C" fn rhash_free_buffer(buffer: RHashBuffer) {
    let _ = catch_unwind(AssertUnwindSafe(|| {
        if !validate_mut_ptr(buffer.data) {
            return;
        }
        unsafe {
            let slice = std::ptr::slice_from_raw_parts_mut(buffer.data, buffer.len);
            drop(Box::from_raw(slice));
        }
    }));
}

/// Free a string returned by `rhash_print_magnet`
#[unsafe(no_mangle)]
pub extern "C" fn rhash_free_string(s: *mut c_char) {
    let _ = catch_unwind(AssertUnwindSafe(|| {
        if validate_mut_ptr(s) {
            unsafe {
                drop(CString::from_raw(s));
            }
        }
    }));
}
