use bytemuck::{Pod, Zeroable};

use super::text::BoundedText;
use crate::color::{Rgb, WHITE};
use crate::config::SETTINGS_MAGIC;

/// Size of the effect name field, including the terminator
pub const EFFECT_FIELD_SIZE: usize = 32;

/// Size of the encoded settings record
pub const SETTINGS_RECORD_SIZE: usize = core::mem::size_of::<RawSettingsRecord>();

/// Effect name as stored in the settings record (31 bytes + terminator)
pub type EffectName = BoundedText<{ EFFECT_FIELD_SIZE - 1 }>;

/// Name of the effect selected on first boot
pub const DEFAULT_EFFECT: &str = "solid";

/// Persisted light settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsRecord {
    pub magic: u16,
    pub brightness: u8,
    pub color: Rgb,
    pub effect: EffectName,
    /// Milliseconds since boot of the last write attempt
    pub last_write: u32,
}

impl Default for SettingsRecord {
    fn default() -> Self {
        Self {
            magic: SETTINGS_MAGIC,
            brightness: 255,
            color: WHITE,
            effect: EffectName::new(DEFAULT_EFFECT),
            last_write: 0,
        }
    }
}

impl SettingsRecord {
    pub(crate) fn encode(&self) -> RawSettingsRecord {
        RawSettingsRecord {
            magic: self.magic.to_le_bytes(),
            brightness: self.brightness,
            color: [self.color.r, self.color.g, self.color.b],
            effect: self.effect.to_padded(),
            _padding: [0; 2],
            last_write: self.last_write.to_le_bytes(),
        }
    }

    pub(crate) fn decode(raw: &RawSettingsRecord) -> Self {
        Self {
            magic: u16::from_le_bytes(raw.magic),
            brightness: raw.brightness,
            color: Rgb::new(raw.color[0], raw.color[1], raw.color[2]),
            effect: EffectName::from_padded(&raw.effect),
            last_write: u32::from_le_bytes(raw.last_write),
        }
    }
}

/// On-device byte layout of [`SettingsRecord`]
///
/// Mirrors the C layout used by earlier builds: the two padding bytes align
/// the timestamp to a 4-byte boundary. Multi-byte fields are little-endian.
#[derive(Debug, Clone, Copy, Zeroable, Pod)]
#[repr(C)]
pub(crate) struct RawSettingsRecord {
    magic: [u8; 2],
    brightness: u8,
    color: [u8; 3],
    effect: [u8; EFFECT_FIELD_SIZE],
    _padding: [u8; 2],
    last_write: [u8; 4],
}

impl RawSettingsRecord {
    pub(crate) fn magic(&self) -> u16 {
        u16::from_le_bytes(self.magic)
    }

    /// Compare every field a reader depends on, byte for byte
    ///
    /// The write timestamp is not part of the comparison.
    pub(crate) fn same_contents(&self, other: &Self) -> bool {
        self.magic == other.magic
            && self.brightness == other.brightness
            && self.color == other.color
            && self.effect == other.effect
    }
}
