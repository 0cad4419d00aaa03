//! C-compatible type definitions for FFI

use std::ptr;

/// Status codes returned by every FFI entry point
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RHashStatus {
    Success = 0,
    UnknownAlgorithm = 1,
    InvalidRange = 2,
    AlreadyFinalized = 3,
    NotFinalized = 4,
    InvalidHandle = 5,
    InvalidFilename = 6,
    NotInitialized = 7,
    HandleLimit = 8,
    InvalidParameter = 9,
    Internal = 10,
    Unknown = 99,
}

/// Library-owned byte buffer, released with `rhash_free_buffer`
#[repr(C)]
#[derive(Debug)]
pub struct RHashBuffer {
    pub data: *mut u8,
    pub len: usize,
}

impl RHashBuffer {
    pub const fn empty() -> Self {
        Self {
            data: ptr::null_mut(),
            len: 0,
        }
    }
}

impl Default for RHashBuffer {
    fn default() -> Self {
        Self::empty()
    }
}
