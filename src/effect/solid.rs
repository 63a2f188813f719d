//! Solid color fill effect

use super::Effect;
use crate::{color::Rgb, random::RandomSource};

/// Fills all LEDs with the requested color
#[derive(Debug, Clone, Default)]
pub struct SolidEffect;

impl Effect for SolidEffect {
    fn render<R: RandomSource>(&mut self, leds: &mut [Rgb], color: Rgb, _rng: &mut R) {
        leds.fill(color);
    }
}
