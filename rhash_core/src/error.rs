//! Error types for the rhash engine
//!
//! Errors are grouped the same way callers react to them: bad input
//! (validation), an operation issued in the wrong lifecycle state (state),
//! and failures inside the library itself (internal).

use thiserror::Error;

pub mod internal;
pub mod state;
pub mod validation;

pub use internal::InternalError;
pub use state::StateError;
pub use validation::ValidationError;

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the rhash engine
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Invalid caller input
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Operation not permitted in the current lifecycle state
    #[error(transparent)]
    State(#[from] StateError),

    /// Internal library errors
    #[error(transparent)]
    Internal(#[from] InternalError),
}

/// Flat classification of every error the engine can report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    UnknownAlgorithm,
    InvalidRange,
    InvalidFilename,
    AlreadyFinalized,
    NotFinalized,
    InvalidHandle,
    NotInitialized,
    HandleLimitExceeded,
    Internal,
}

impl Error {
    /// Shorthand for [`ValidationError::UnknownAlgorithm`]
    pub fn unknown_algorithm(id: u32) -> Self {
        Self::Validation(ValidationError::unknown_algorithm(id))
    }

    /// Shorthand for [`ValidationError::InvalidRange`]
    pub fn invalid_range(offset: usize, length: usize, available: usize) -> Self {
        Self::Validation(ValidationError::invalid_range(offset, length, available))
    }

    /// Shorthand for [`StateError::InvalidHandle`]
    pub fn invalid_handle(handle: u64) -> Self {
        Self::State(StateError::InvalidHandle { handle })
    }

    /// Classify this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Validation(err) => match err {
                ValidationError::UnknownAlgorithm { .. } => ErrorKind::UnknownAlgorithm,
                ValidationError::InvalidRange { .. } => ErrorKind::InvalidRange,
                ValidationError::InvalidFilename { .. } => ErrorKind::InvalidFilename,
            },
            Error::State(err) => match err {
                StateError::AlreadyFinalized => ErrorKind::AlreadyFinalized,
                StateError::NotFinalized => ErrorKind::NotFinalized,
                StateError::InvalidHandle { .. } => ErrorKind::InvalidHandle,
                StateError::NotInitialized => ErrorKind::NotInitialized,
                StateError::HandleLimitExceeded { .. } => ErrorKind::HandleLimitExceeded,
            },
            Error::Internal(_) => ErrorKind::Internal,
        }
    }
}
