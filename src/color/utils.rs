pub use smart_leds::hsv::hsv2rgb;

use crate::{
    color::{Hsv, Rgb},
    math8::{add_signed8, fade8, qadd8, scale8},
};

/// Saturation used for rainbow fills
const RAINBOW_SATURATION: u8 = 240;

pub const WHITE: Rgb = Rgb {
    r: 255,
    g: 255,
    b: 255,
};

/// Scale every channel of a color by `scale` (0-255 = 0.0-1.0)
#[inline]
pub const fn scale_color(color: Rgb, scale: u8) -> Rgb {
    Rgb {
        r: scale8(color.r, scale),
        g: scale8(color.g, scale),
        b: scale8(color.b, scale),
    }
}

/// Fade a color toward black by `amount`/256ths of its value
#[inline]
pub const fn fade_to_black(color: Rgb, amount: u8) -> Rgb {
    Rgb {
        r: fade8(color.r, amount),
        g: fade8(color.g, amount),
        b: fade8(color.b, amount),
    }
}

/// Per-channel saturating add
#[inline]
pub const fn add_colors(a: Rgb, b: Rgb) -> Rgb {
    Rgb {
        r: qadd8(a.r, b.r),
        g: qadd8(a.g, b.g),
        b: qadd8(a.b, b.b),
    }
}

/// Add the same signed offset to every channel, clamping to 0-255
#[inline]
pub const fn offset_color(color: Rgb, delta: i8) -> Rgb {
    Rgb {
        r: add_signed8(color.r, delta),
        g: add_signed8(color.g, delta),
        b: add_signed8(color.b, delta),
    }
}

/// Fully bright rainbow color for a hue on the 0-255 wheel
///
/// Uses the `smart-leds` spectrum mapping, whose yellow band is narrower
/// than `FastLED`'s `hsv2rgb_rainbow`.
#[inline]
pub fn rainbow_hue(hue: u8) -> Rgb {
    hsv2rgb(Hsv {
        hue,
        sat: RAINBOW_SATURATION,
        val: 255,
    })
}

/// Create an RGB color from a u32 value (0xRRGGBB format)
#[allow(clippy::cast_possible_truncation)]
pub const fn rgb_from_u32(color: u32) -> Rgb {
    Rgb {
        r: ((color >> 16) & 0xFF) as u8,
        g: ((color >> 8) & 0xFF) as u8,
        b: (color & 0xFF) as u8,
    }
}

/// Pack an RGB color into a u32 value (0xRRGGBB format)
#[allow(clippy::cast_lossless)]
pub const fn rgb_to_u32(color: Rgb) -> u32 {
    (color.r as u32) << 16 | (color.g as u32) << 8 | color.b as u32
}
