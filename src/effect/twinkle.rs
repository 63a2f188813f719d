//! Twinkle effect
//!
//! Every frame all LEDs fade toward black; now and then a whole group lights
//! up in the requested color and fades out over the following frames.

use super::Effect;
use crate::{
    color::{Rgb, fade_to_black},
    config::GROUP_SIZE,
    random::RandomSource,
};

/// Fraction (of 256) removed from each channel per frame
const FADE_AMOUNT: u8 = 40;

/// Chance (of 256) to light a new group in a frame
const SPARK_CHANCE: u8 = 50;

#[derive(Debug, Clone)]
pub struct TwinkleEffect {
    fade: u8,
}

impl Default for TwinkleEffect {
    fn default() -> Self {
        Self::new()
    }
}

impl TwinkleEffect {
    pub const fn new() -> Self {
        Self { fade: FADE_AMOUNT }
    }

    pub const fn fade(&self) -> u8 {
        self.fade
    }
}

impl Effect for TwinkleEffect {
    fn render<R: RandomSource>(&mut self, leds: &mut [Rgb], color: Rgb, rng: &mut R) {
        for led in leds.iter_mut() {
            *led = fade_to_black(*led, self.fade);
        }

        if rng.random8() < SPARK_CHANCE {
            let groups = u16::try_from(leds.len() / GROUP_SIZE).unwrap_or(u16::MAX);
            let start = usize::from(rng.random16_below(groups)) * GROUP_SIZE;
            let end = (start + GROUP_SIZE).min(leds.len());
            if let Some(group) = leds.get_mut(start..end) {
                group.fill(color);
            }
        }
    }
}
