//! Rainbow cycling effect
//!
//! Spreads the hue wheel along the strip and rotates it by one step per
//! frame, so the pattern repeats every 256 frames.

use super::Effect;
use crate::{
    color::{Rgb, rainbow_hue},
    random::RandomSource,
};

/// Hue difference between neighbouring LEDs
const HUE_DELTA: usize = 7;

#[derive(Debug, Clone, Default)]
pub struct RainbowEffect {
    /// Hue of the first LED in the next frame
    hue: u8,
}

impl RainbowEffect {
    pub const fn new() -> Self {
        Self { hue: 0 }
    }

    /// Hue of the first LED in the next frame
    pub const fn hue(&self) -> u8 {
        self.hue
    }
}

impl Effect for RainbowEffect {
    #[allow(clippy::cast_possible_truncation)]
    fn render<R: RandomSource>(&mut self, leds: &mut [Rgb], _color: Rgb, _rng: &mut R) {
        for (i, led) in leds.iter_mut().enumerate() {
            // Truncation wraps the offset around the hue wheel
            let offset = i.wrapping_mul(HUE_DELTA) as u8;
            *led = rainbow_hue(self.hue.wrapping_add(offset));
        }
        self.hue = self.hue.wrapping_add(1);
    }
}
