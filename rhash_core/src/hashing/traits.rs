//! Core trait for pluggable hash algorithm state

/// Running state of one algorithm inside a hash context
///
/// Implementations must produce the same digest however the input is split
/// across `update` calls.
pub trait StreamingHasher: Send {
    /// Feed the next chunk of the message
    fn update(&mut self, data: &[u8]);

    /// Apply the algorithm's padding and return the binary digest
    fn finalize(self: Box<Self>) -> Vec<u8>;
}

/// Factory stored in each algorithm descriptor
pub(crate) type HasherFactory = fn(&super::HasherOptions) -> Box<dyn StreamingHasher>;
