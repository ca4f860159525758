//! Deterministic byte fixtures.

use bytes::Bytes;

/// xorshift64; a fixed seed gives identical output on every run.
pub struct Xorshift64(u64);

impl Xorshift64 {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self(seed.max(1))
    }

    pub fn next_u64(&mut self) -> u64 {
        self.0 ^= self.0 << 13;
        self.0 ^= self.0 >> 7;
        self.0 ^= self.0 << 17;
        self.0
    }
}

/// `len` pseudo-random bytes derived from `seed`.
#[must_use]
pub fn pattern_bytes(len: usize, seed: u64) -> Bytes {
    let mut rng = Xorshift64::new(seed);
    let mut out = Vec::with_capacity(len);
    while out.len() < len {
        let word = rng.next_u64().to_le_bytes();
        let take = (len - out.len()).min(word.len());
        out.extend_from_slice(&word[..take]);
    }
    Bytes::from(out)
}
