/// Small deterministic PRNG used to seed initial layout positions.
#[derive(Debug, Clone)]
pub(crate) struct XorShift64Star {
    state: u64,
}

impl XorShift64Star {
    pub(crate) fn new(seed: u64) -> Self {
        let mut rng = Self {
            state: seed.max(1),
        };
        // Decorrelate adjacent seeds.
        rng.state ^= seed.wrapping_mul(0x9E3779B97F4A7C15_u64);
        if rng.state == 0 {
            rng.state = 1;
        }
        let _ = rng.next_u64();
        rng
    }

    pub(crate) fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x >> 12;
        x ^= x << 25;
        x ^= x >> 27;
        self.state = x;
        x.wrapping_mul(0x2545F4914F6CDD1D_u64)
    }

    /// Uniform sample in `[0, 1)` with 53 bits of precision.
    pub(crate) fn next_f64_unit(&mut self) -> f64 {
        let u = self.next_u64() >> 11;
        (u as f64) / ((1u64 << 53) as f64)
    }
}
