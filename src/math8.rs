//! 8-bit fixed-point helpers (ported from `FastLED` lib8tion)

/// Scale an 8-bit value by a factor (0-255 = 0.0-1.0)
///
/// Uses integer math for efficiency on embedded systems.
#[inline]
#[allow(clippy::cast_lossless, clippy::cast_possible_truncation)]
pub const fn scale8(value: u8, scale: u8) -> u8 {
    ((value as u16 * (1 + scale as u16)) >> 8) as u8
}

/// Add two values, saturating at 255
#[inline]
pub const fn qadd8(a: u8, b: u8) -> u8 {
    a.saturating_add(b)
}

/// Add a signed delta, clamping the result to 0-255
#[inline]
#[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
pub const fn add_signed8(value: u8, delta: i8) -> u8 {
    let sum = value as i16 + delta as i16;
    if sum < 0 {
        0
    } else if sum > 255 {
        255
    } else {
        sum as u8
    }
}

/// Reduce a value toward zero by `amount`/256ths of itself
#[inline]
pub const fn fade8(value: u8, amount: u8) -> u8 {
    scale8(value, 255 - amount)
}

const SIN8_TABLE: [u8; 8] = [0, 49, 49, 41, 90, 27, 117, 10];

/// Fast 8-bit sine approximation
///
/// Input is an angle where 0-255 covers one full period; output is
/// `128 + 127 * sin(theta)`, so `sin8(0) == 128`, `sin8(64) == 255`,
/// `sin8(192) == 1`.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub const fn sin8(theta: u8) -> u8 {
    let mut offset = theta;
    if theta & 0x40 != 0 {
        offset = 255 - offset;
    }
    offset &= 0x3F;

    let mut secoffset = offset & 0x0F;
    if theta & 0x40 != 0 {
        secoffset += 1;
    }

    let section = (offset >> 4) as usize;
    let b = SIN8_TABLE[section * 2] as i16;
    let m16 = SIN8_TABLE[section * 2 + 1] as i16;

    let mx = (m16 * secoffset as i16) >> 4;
    let mut y = mx + b;
    if theta & 0x80 != 0 {
        y = -y;
    }

    (y + 128) as u8
}
