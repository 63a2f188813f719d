//! Random number sources for procedural effects
//!
//! Effects draw randomness through [`RandomSource`] so the firmware can seed
//! from the hardware RNG while tests script the exact sequence.

/// Source of pseudo-random numbers
///
/// Only [`RandomSource::next_u32`] is required. The ranged helpers follow the
/// `FastLED` `random8`/`random16` scaling (multiply-and-shift, no modulo).
pub trait RandomSource {
    /// Next raw 32-bit value
    fn next_u32(&mut self) -> u32;

    /// Random value in 0..=255
    #[allow(clippy::cast_possible_truncation)]
    fn random8(&mut self) -> u8 {
        (self.next_u32() >> 24) as u8
    }

    /// Random value in `0..limit` (0 when `limit` is 0)
    #[allow(clippy::cast_possible_truncation)]
    fn random8_below(&mut self, limit: u8) -> u8 {
        ((u16::from(self.random8()) * u16::from(limit)) >> 8) as u8
    }

    /// Random value in `min..max`
    fn random8_between(&mut self, min: u8, max: u8) -> u8 {
        min + self.random8_below(max.saturating_sub(min))
    }

    /// Random value in `0..limit` (0 when `limit` is 0)
    #[allow(clippy::cast_possible_truncation)]
    fn random16_below(&mut self, limit: u16) -> u16 {
        let value = self.next_u32() >> 16;
        ((value * u32::from(limit)) >> 16) as u16
    }

    /// Random unit fraction in `[0.0, 1.0)`
    fn random_unit(&mut self) -> f32 {
        f32::from(self.random8()) / 256.0
    }
}

/// `SplitMix64` generator
#[derive(Debug, Clone)]
pub struct SplitMix {
    state: u64,
}

impl SplitMix {
    pub const fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9e37_79b9_7f4a_7c15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
        z ^ (z >> 31)
    }
}

impl RandomSource for SplitMix {
    #[allow(clippy::cast_possible_truncation)]
    fn next_u32(&mut self) -> u32 {
        (self.next_u64() >> 32) as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(u32);

    impl RandomSource for Fixed {
        fn next_u32(&mut self) -> u32 {
            self.0
        }
    }

    #[test]
    fn ranged_helpers_stay_in_bounds() {
        let mut max = Fixed(u32::MAX);
        assert_eq!(max.random8(), 255);
        assert_eq!(max.random8_below(10), 9);
        assert_eq!(max.random8_between(30, 50), 49);
        assert_eq!(max.random16_below(17), 16);
        assert!(max.random_unit() < 1.0);

        let mut zero = Fixed(0);
        assert_eq!(zero.random8_between(30, 50), 30);
        assert_eq!(zero.random16_below(0), 0);
        assert_eq!(zero.random_unit(), 0.0);
    }

    #[test]
    fn split_mix_is_deterministic() {
        let mut a = SplitMix::new(42);
        let mut b = SplitMix::new(42);
        for _ in 0..16 {
            assert_eq!(a.next_u32(), b.next_u32());
        }
    }
}
