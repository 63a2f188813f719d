//! Traveling sine wave of the requested color

use super::Effect;
use crate::{
    color::{Rgb, scale_color},
    math8::sin8,
    random::RandomSource,
};

/// Phase advance per frame; one full wave passes every 128 frames
const PHASE_STEP: u8 = 2;

#[derive(Debug, Clone, Default)]
pub struct WaveEffect {
    phase: u8,
}

impl WaveEffect {
    pub const fn new() -> Self {
        Self { phase: 0 }
    }

    pub const fn phase(&self) -> u8 {
        self.phase
    }
}

impl Effect for WaveEffect {
    #[allow(clippy::cast_possible_truncation)]
    fn render<R: RandomSource>(&mut self, leds: &mut [Rgb], color: Rgb, _rng: &mut R) {
        let len = leds.len();
        for (i, led) in leds.iter_mut().enumerate() {
            // i < len, so the offset stays below 255
            let offset = (i * 255 / len) as u8;
            *led = scale_color(color, sin8(self.phase.wrapping_add(offset)));
        }
        self.phase = self.phase.wrapping_add(PHASE_STEP);
    }
}
