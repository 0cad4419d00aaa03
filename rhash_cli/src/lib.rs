//! Library side of the `rhash` binary, exposed for integration tests

pub mod config;
pub mod hasher;
pub mod output;
pub mod progress;
pub mod terminal;
