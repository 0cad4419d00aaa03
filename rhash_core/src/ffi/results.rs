//! Status descriptions for FFI

use crate::ffi::types::RHashStatus;
use std::ffi::c_char;

/// Static, NUL-terminated description of a status code
#[unsafe(no_mangle)]
pub extern "C" fn rhash_error_string(status: RHashStatus) -> *const c_char {
    let msg = match status {
        RHashStatus::Success => "Success\0",
        RHashStatus::UnknownAlgorithm => "Unknown hash algorithm\0",
        RHashStatus::InvalidRange => "Invalid byte range\0",
        RHashStatus::AlreadyFinalized => "Context already finalized\0",
        RHashStatus::NotFinalized => "Context not finalized\0",
        RHashStatus::InvalidHandle => "Invalid handle\0",
        RHashStatus::InvalidFilename => "Invalid filename\0",
        RHashStatus::NotInitialized => "Library not initialized\0",
        RHashStatus::HandleLimit => "Handle limit exceeded\0",
        RHashStatus::InvalidParameter => "Invalid parameter\0",
        RHashStatus::Internal => "Internal error\0",
        RHashStatus::Unknown => "Unknown error\0",
    };
    msg.as_ptr() as *const c_char
}
