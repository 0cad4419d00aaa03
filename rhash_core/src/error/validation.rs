//! Validation related error types

use thiserror::Error;

/// Errors caused by invalid caller input
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A flag bit or id that does not name a registered algorithm
    #[error("Unknown hash algorithm id {id:#x}")]
    UnknownAlgorithm { id: u32 },

    /// Byte range outside of the supplied buffer
    #[error("Invalid range: offset {offset} + length {length} exceeds buffer of {available} bytes")]
    InvalidRange {
        offset: usize,
        length: usize,
        available: usize,
    },

    /// Filename that cannot be percent-encoded into a URI
    #[error("Invalid filename: {reason}")]
    InvalidFilename { reason: String },
}

impl ValidationError {
    /// Create an unknown algorithm error
    pub fn unknown_algorithm(id: u32) -> Self {
        Self::UnknownAlgorithm { id }
    }

    /// Create an invalid range error
    pub fn invalid_range(offset: usize, length: usize, available: usize) -> Self {
        Self::InvalidRange {
            offset,
            length,
            available,
        }
    }

    /// Create an invalid filename error
    pub fn invalid_filename(reason: impl Into<String>) -> Self {
        Self::InvalidFilename {
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_algorithm_formats_hex() {
        let error = ValidationError::unknown_algorithm(0x20000);
        assert_eq!(error.to_string(), "Unknown hash algorithm id 0x20000");
    }

    #[test]
    fn test_invalid_filename() {
        let error = ValidationError::invalid_filename("invalid UTF-8 at byte 4");
        assert!(error.to_string().contains("Invalid filename"));
        assert!(error.to_string().contains("byte 4"));
    }
}
