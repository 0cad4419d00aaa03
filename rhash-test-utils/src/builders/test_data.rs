//! Deterministic test data

/// How the bytes of a generated buffer are filled
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataPattern {
    /// Every byte zero
    Zeros,
    /// `index % 256`
    Counter,
    /// The given bytes repeated
    Repeating(Vec<u8>),
    /// xorshift64 stream from a fixed seed
    Pseudorandom(u64),
}

/// Builder for deterministic byte buffers
#[derive(Debug, Clone)]
pub struct TestDataBuilder {
    len: usize,
    pattern: DataPattern,
}

impl Default for TestDataBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestDataBuilder {
    /// 1 KiB of counter bytes
    pub fn new() -> Self {
        Self {
            len: 1024,
            pattern: DataPattern::Counter,
        }
    }

    pub fn with_len(mut self, len: usize) -> Self {
        self.len = len;
        self
    }

    pub fn with_pattern(mut self, pattern: DataPattern) -> Self {
        self.pattern = pattern;
        self
    }

    /// Shorthand for a seeded pseudorandom pattern
    pub fn with_seed(self, seed: u64) -> Self {
        self.with_pattern(DataPattern::Pseudorandom(seed))
    }

    pub fn build(&self) -> Vec<u8> {
        match &self.pattern {
            DataPattern::Zeros => vec![0; self.len],
            DataPattern::Counter => (0..self.len).map(|i| (i % 256) as u8).collect(),
            DataPattern::Repeating(unit) if unit.is_empty() => vec![0; self.len],
            DataPattern::Repeating(unit) => unit.iter().copied().cycle().take(self.len).collect(),
            DataPattern::Pseudorandom(seed) => {
                // A zero state would stay zero forever
                let mut state = seed.wrapping_add(0x9e37_79b9_7f4a_7c15) | 1;
                (0..self.len)
                    .map(|_| {
                        state ^= state << 13;
                        state ^= state >> 7;
                        state ^= state << 17;
                        (state >> 24) as u8
                    })
                    .collect()
            }
        }
    }
}
