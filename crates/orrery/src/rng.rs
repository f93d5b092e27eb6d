//! Seedable xorshift64* generator driving placement sampling.
//!
//! One stream per layout, seeded from `randomSeed`. Each placement candidate takes two draws from
//! it: a unit draw for the height on the ring, then a sign for the side of the vertical axis.
//! Reordering those draws changes every layout produced for a given seed.

#[derive(Debug, Clone)]
pub(crate) struct XorShift64Star {
    state: u64,
}

impl XorShift64Star {
    pub(crate) fn new(seed: u64) -> Self {
        Self { state: seed.max(1) }
    }

    pub(crate) fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x >> 12;
        x ^= x << 25;
        x ^= x >> 27;
        self.state = x;
        x.wrapping_mul(0x2545F4914F6CDD1D_u64)
    }

    /// Uniform in `[0, 1)` with 53 bits of precision.
    pub(crate) fn next_f64_unit(&mut self) -> f64 {
        let u = self.next_u64() >> 11;
        (u as f64) / ((1u64 << 53) as f64)
    }

    /// `-1.0` or `1.0` with equal probability. Consumes exactly one unit draw, giving `-1.0`
    /// when it falls below one half.
    pub(crate) fn next_sign(&mut self) -> f64 {
        if self.next_f64_unit() < 0.5 { -1.0 } else { 1.0 }
    }
}
