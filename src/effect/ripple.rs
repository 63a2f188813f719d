//! Water ripple effect
//!
//! The strip is filled with a dimmed "water" tone of the requested color.
//! Up to [`MAX_RIPPLES`] ripples spread outward from group centers; the
//! crest of each ripple is a half sine wave two groups wide that brightens
//! whole groups at a time. A small per-group noise adds shimmer.

use core::f32::consts::PI;

use super::Effect;
use crate::{
    color::{Rgb, add_colors, offset_color, scale_color},
    config::{GROUP_SIZE, MAX_RIPPLES},
    random::RandomSource,
};

/// Scale of the base water tone (about 50%)
const BASE_SCALE: u8 = 128;

/// Chance (of 256) to start a new ripple in a frame
const SPAWN_CHANCE: u8 = 25;

/// Width of a ripple crest in LEDs
#[allow(clippy::cast_precision_loss)]
const CREST_WIDTH: f32 = (GROUP_SIZE * 2) as f32;

const MIN_LIFETIME: u8 = 30;
const MAX_LIFETIME: u8 = 50;
const MIN_AMPLITUDE: f32 = 0.3;
const AMPLITUDE_RANGE: f32 = 0.5;
const MIN_SPEED: f32 = 0.15;
const SPEED_RANGE: f32 = 0.2;

/// Noise is drawn from `0..NOISE_SPAN` and shifted down by `NOISE_OFFSET`
const NOISE_SPAN: u8 = 10;
const NOISE_OFFSET: i8 = 5;

/// One slot of the ripple pool
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Ripple {
    /// LED index the ripple spreads from
    pub center: usize,
    /// Frames since the ripple started
    pub age: u16,
    /// Age at which the ripple is retired
    pub max_age: u16,
    /// Crest height (0.0-1.0)
    pub amplitude: f32,
    /// Spread in LEDs per frame
    pub speed: f32,
    pub active: bool,
}

impl Ripple {
    /// Highlight scale (0-255) contributed to the LED at `index`
    #[allow(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    fn intensity_at(&self, index: usize) -> Option<u8> {
        let distance = libm::fabsf(index as f32 - self.center as f32);
        let position = distance - f32::from(self.age) * self.speed;
        if !(0.0..CREST_WIDTH).contains(&position) {
            return None;
        }
        let level = (libm::sinf(position * PI / CREST_WIDTH) * self.amplitude).clamp(0.0, 1.0);
        Some((255.0 * level) as u8)
    }

    fn advance(&mut self) {
        self.age += 1;
        if self.age >= self.max_age {
            self.active = false;
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct RippleEffect {
    pool: [Ripple; MAX_RIPPLES],
}

impl RippleEffect {
    pub const fn new() -> Self {
        Self {
            pool: [Ripple {
                center: 0,
                age: 0,
                max_age: 0,
                amplitude: 0.0,
                speed: 0.0,
                active: false,
            }; MAX_RIPPLES],
        }
    }

    pub fn ripples(&self) -> &[Ripple] {
        &self.pool
    }

    pub fn active_count(&self) -> usize {
        self.pool.iter().filter(|ripple| ripple.active).count()
    }

    /// Start a ripple in the first free slot, if any
    fn spawn<R: RandomSource>(&mut self, len: usize, rng: &mut R) {
        let Some(slot) = self.pool.iter_mut().find(|ripple| !ripple.active) else {
            return;
        };

        let groups = u16::try_from(len / GROUP_SIZE).unwrap_or(u16::MAX);
        let group = usize::from(rng.random16_below(groups));
        let max_age = rng.random8_between(MIN_LIFETIME, MAX_LIFETIME);
        let amplitude = MIN_AMPLITUDE + rng.random_unit() * AMPLITUDE_RANGE;
        let speed = MIN_SPEED + rng.random_unit() * SPEED_RANGE;

        *slot = Ripple {
            center: group * GROUP_SIZE + GROUP_SIZE / 2,
            age: 0,
            max_age: u16::from(max_age),
            amplitude,
            speed,
            active: true,
        };
    }
}

impl Effect for RippleEffect {
    #[allow(clippy::cast_possible_wrap)]
    fn render<R: RandomSource>(&mut self, leds: &mut [Rgb], color: Rgb, rng: &mut R) {
        let len = leds.len();
        leds.fill(scale_color(color, BASE_SCALE));

        for ripple in self.pool.iter_mut().filter(|ripple| ripple.active) {
            for index in 0..len {
                let Some(level) = ripple.intensity_at(index) else {
                    continue;
                };
                let highlight = scale_color(color, level);
                let start = index / GROUP_SIZE * GROUP_SIZE;
                let end = (start + GROUP_SIZE).min(len);
                for led in &mut leds[start..end] {
                    *led = add_colors(*led, highlight);
                }
            }
            ripple.advance();
        }

        if rng.random8() < SPAWN_CHANCE {
            self.spawn(len, rng);
        }

        for group in leds.chunks_mut(GROUP_SIZE) {
            // NOISE_SPAN < 128, so the cast cannot wrap
            let noise = rng.random8_below(NOISE_SPAN) as i8 - NOISE_OFFSET;
            for led in group {
                *led = offset_color(*led, noise);
            }
        }
    }
}
