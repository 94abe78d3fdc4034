/// Xorshift64* generator for the bitmap scatter.
///
/// Not cryptographic; the demo only needs cheap, reproducible positions.
#[derive(Debug, Clone)]
pub struct XorShift {
    state: u64,
}

impl XorShift {
    /// A zero seed would stick at zero, so it is replaced by a fixed constant.
    pub fn new(seed: u64) -> Self {
        Self {
            state: if seed == 0 { 0x9E37_79B9_7F4A_7C15 } else { seed },
        }
    }

    /// Seeds from the OS, falling back to the clock.
    pub fn from_entropy() -> Self {
        let seed = getrandom::u64().unwrap_or_else(|e| {
            log::debug!("getrandom failed ({e}); seeding from the clock");
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map_or(0, |d| d.as_nanos() as u64)
        });
        Self::new(seed)
    }

    pub fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x >> 12;
        x ^= x << 25;
        x ^= x >> 27;
        self.state = x;
        x.wrapping_mul(0x2545_F491_4F6C_DD1D)
    }

    /// Uniform in `0..n`. `n` must be non-zero.
    pub fn below(&mut self, n: u32) -> u32 {
        debug_assert!(n > 0);
        (((self.next_u64() >> 32) * u64::from(n)) >> 32) as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_stream() {
        let mut a = XorShift::new(42);
        let mut b = XorShift::new(42);
        for _ in 0..16 {
            assert_eq!(a.next_u64(), b.next_u64());
        }
    }

    #[test]
    fn below_reaches_every_value() {
        let mut rng = XorShift::new(11);
        let mut seen = [false; 8];
        for _ in 0..1_000 {
            seen[rng.below(8) as usize] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }

    #[test]
    fn below_stays_in_range() {
        let mut rng = XorShift::new(7);
        for _ in 0..10_000 {
            assert!(rng.below(64) < 64);
            assert!(rng.below(1) == 0);
        }
    }

    #[test]
    fn zero_seed_still_moves() {
        let mut rng = XorShift::new(0);
        assert_ne!(rng.next_u64(), rng.next_u64());
    }
}
