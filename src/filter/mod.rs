//! Output filters applied between the frame buffer and the strip driver

use crate::color::{Rgb, scale_color};

/// Global brightness, applied when a frame is sent to the strip
///
/// The animation buffer itself is never scaled, so effects that read back
/// their previous frame see unscaled colors.
#[derive(Debug, Clone, Copy)]
pub(crate) struct BrightnessFilter {
    level: u8,
}

impl BrightnessFilter {
    pub(crate) const fn new(level: u8) -> Self {
        Self { level }
    }

    pub(crate) fn set(&mut self, level: u8) {
        self.level = level;
    }

    /// Write `frame` scaled by the current level into `output`
    pub(crate) fn apply(&self, frame: &[Rgb], output: &mut [Rgb]) {
        let pixels = output.iter_mut().zip(frame);
        match self.level {
            255 => pixels.for_each(|(out, pixel)| *out = *pixel),
            0 => pixels.for_each(|(out, _)| *out = Rgb { r: 0, g: 0, b: 0 }),
            level => pixels.for_each(|(out, pixel)| *out = scale_color(*pixel, level)),
        }
    }
}
