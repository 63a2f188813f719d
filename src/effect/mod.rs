//! Effect system with compile-time known effect variants
//!
//! Every effect keeps its own animation state inside the [`EffectEngine`].
//! Switching effects only changes which generator runs; the state of the
//! others is left as it was until they run again.

mod rainbow;
mod ripple;
mod solid;
mod twinkle;
mod wave;

pub use rainbow::RainbowEffect;
pub use ripple::{Ripple, RippleEffect};
pub use solid::SolidEffect;
pub use twinkle::TwinkleEffect;
pub use wave::WaveEffect;

use crate::{color::Rgb, random::RandomSource};

const EFFECT_NAME_SOLID: &str = "solid";
const EFFECT_NAME_RAINBOW: &str = "rainbow";
const EFFECT_NAME_RIPPLE: &str = "ripple";
const EFFECT_NAME_TWINKLE: &str = "twinkle";
const EFFECT_NAME_WAVE: &str = "wave";

const EFFECT_ID_SOLID: u8 = 0;
const EFFECT_ID_RAINBOW: u8 = 1;
const EFFECT_ID_RIPPLE: u8 = 2;
const EFFECT_ID_TWINKLE: u8 = 3;
const EFFECT_ID_WAVE: u8 = 4;

pub trait Effect {
    /// Render a single frame into `leds`
    ///
    /// Generators may read the previous frame from `leds`. Every LED is
    /// written before returning.
    fn render<R: RandomSource>(&mut self, leds: &mut [Rgb], color: Rgb, rng: &mut R);
}

/// Known effect ids that can be requested.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum EffectId {
    Solid = EFFECT_ID_SOLID,
    Rainbow = EFFECT_ID_RAINBOW,
    Ripple = EFFECT_ID_RIPPLE,
    Twinkle = EFFECT_ID_TWINKLE,
    Wave = EFFECT_ID_WAVE,
}

impl EffectId {
    /// All effects, in id order
    pub const ALL: [Self; 5] = [
        Self::Solid,
        Self::Rainbow,
        Self::Ripple,
        Self::Twinkle,
        Self::Wave,
    ];

    pub fn from_raw(value: u8) -> Option<Self> {
        Some(match value {
            EFFECT_ID_SOLID => Self::Solid,
            EFFECT_ID_RAINBOW => Self::Rainbow,
            EFFECT_ID_RIPPLE => Self::Ripple,
            EFFECT_ID_TWINKLE => Self::Twinkle,
            EFFECT_ID_WAVE => Self::Wave,
            _ => return None,
        })
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Solid => EFFECT_NAME_SOLID,
            Self::Rainbow => EFFECT_NAME_RAINBOW,
            Self::Ripple => EFFECT_NAME_RIPPLE,
            Self::Twinkle => EFFECT_NAME_TWINKLE,
            Self::Wave => EFFECT_NAME_WAVE,
        }
    }

    /// Parse an effect name; matching is exact and case-sensitive
    pub fn parse_from_str(s: &str) -> Option<Self> {
        match s {
            EFFECT_NAME_SOLID => Some(Self::Solid),
            EFFECT_NAME_RAINBOW => Some(Self::Rainbow),
            EFFECT_NAME_RIPPLE => Some(Self::Ripple),
            EFFECT_NAME_TWINKLE => Some(Self::Twinkle),
            EFFECT_NAME_WAVE => Some(Self::Wave),
            _ => None,
        }
    }
}

/// Owner of all effect generators and their animation state
pub struct EffectEngine<R: RandomSource> {
    rng: R,
    solid: SolidEffect,
    rainbow: RainbowEffect,
    twinkle: TwinkleEffect,
    wave: WaveEffect,
    ripple: RippleEffect,
}

impl<R: RandomSource> EffectEngine<R> {
    pub fn new(rng: R) -> Self {
        Self {
            rng,
            solid: SolidEffect,
            rainbow: RainbowEffect::new(),
            twinkle: TwinkleEffect::new(),
            wave: WaveEffect::new(),
            ripple: RippleEffect::new(),
        }
    }

    /// Render one frame of `effect`
    ///
    /// With no effect (an unrecognized name) the frame is left untouched and
    /// `false` is returned.
    pub fn render(&mut self, effect: Option<EffectId>, leds: &mut [Rgb], color: Rgb) -> bool {
        let rng = &mut self.rng;
        match effect {
            Some(EffectId::Solid) => self.solid.render(leds, color, rng),
            Some(EffectId::Rainbow) => self.rainbow.render(leds, color, rng),
            Some(EffectId::Ripple) => self.ripple.render(leds, color, rng),
            Some(EffectId::Twinkle) => self.twinkle.render(leds, color, rng),
            Some(EffectId::Wave) => self.wave.render(leds, color, rng),
            None => return false,
        }
        true
    }

    pub fn rainbow(&self) -> &RainbowEffect {
        &self.rainbow
    }

    pub fn twinkle(&self) -> &TwinkleEffect {
        &self.twinkle
    }

    pub fn wave(&self) -> &WaveEffect {
        &self.wave
    }

    pub fn ripple(&self) -> &RippleEffect {
        &self.ripple
    }
}
