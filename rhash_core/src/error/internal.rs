//! Internal library error types

use thiserror::Error;

/// Internal library errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InternalError {
    /// A thread panicked while holding one of the engine locks
    #[error("Lock poisoned: {resource}")]
    LockPoisoned { resource: &'static str },

    /// Internal assertion failure
    #[error("Internal assertion failed: {message}")]
    Assertion { message: String },
}

impl InternalError {
    /// Create a lock poisoned error
    pub fn lock_poisoned(resource: &'static str) -> Self {
        Self::LockPoisoned { resource }
    }

    /// Create an internal assertion failure error
    pub fn assertion(message: impl Into<String>) -> Self {
        Self::Assertion {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lock_poisoned_error() {
        let error = InternalError::lock_poisoned("digests");
        assert!(error.to_string().contains("Lock poisoned"));
        assert!(error.to_string().contains("digests"));
    }

    #[test]
    fn test_assertion_error() {
        let error = InternalError::assertion("Invariant violated");
        assert!(error.to_string().contains("Internal assertion failed"));
        assert!(error.to_string().contains("Invariant violated"));
    }
}
