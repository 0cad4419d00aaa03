//! Builders for test inputs

mod test_data;

pub use test_data::{DataPattern, TestDataBuilder};
