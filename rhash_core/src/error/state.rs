//! Lifecycle state error types

use thiserror::Error;

/// Operations issued against an object in the wrong state
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StateError {
    /// Update attempted on a finalized context
    #[error("Hash context is already finalized")]
    AlreadyFinalized,

    /// Digest requested from a context that has not been finalized
    #[error("Hash context has not been finalized")]
    NotFinalized,

    /// Handle that was never issued or has been released
    #[error("Invalid handle {handle:#x}")]
    InvalidHandle { handle: u64 },

    /// Handle surface used before `library_init`
    #[error("Library is not initialized")]
    NotInitialized,

    /// Handle table reached its configured size
    #[error("Too many open {kind} handles: limit is {limit}")]
    HandleLimitExceeded { kind: &'static str, limit: usize },
}

impl StateError {
    /// Create a handle limit error
    pub fn handle_limit_exceeded(kind: &'static str, limit: usize) -> Self {
        Self::HandleLimitExceeded { kind, limit }
    }
}
