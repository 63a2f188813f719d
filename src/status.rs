//! Published light state for status reporting

use core::cell::RefCell;
use core::fmt::Write;

use critical_section::Mutex;
use heapless::String;

use crate::color::{Rgb, WHITE};
use crate::storage::{DEFAULT_EFFECT, EffectName};

/// Copy of the control state as last applied by the control loop
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LightSnapshot {
    pub brightness: u8,
    pub color: Rgb,
    pub effect: EffectName,
}

impl Default for LightSnapshot {
    fn default() -> Self {
        Self {
            brightness: 255,
            color: WHITE,
            effect: EffectName::new(DEFAULT_EFFECT),
        }
    }
}

impl LightSnapshot {
    /// Light counts as on while brightness is above zero
    pub const fn is_on(&self) -> bool {
        self.brightness > 0
    }

    /// Color as `#RRGGBB`
    pub fn color_hex(&self) -> String<7> {
        let mut hex = String::new();
        // 7 bytes always fit
        let _ = write!(hex, "#{:02X}{:02X}{:02X}", self.color.r, self.color.g, self.color.b);
        hex
    }
}

/// Single publication point of the light state
///
/// The control loop publishes after applying commands; adapters read from
/// any context.
pub struct StatusBoard {
    state: Mutex<RefCell<Option<LightSnapshot>>>,
}

impl StatusBoard {
    pub const fn new() -> Self {
        Self {
            state: Mutex::new(RefCell::new(None)),
        }
    }

    pub fn publish(&self, snapshot: LightSnapshot) {
        critical_section::with(|cs| {
            self.state.borrow(cs).replace(Some(snapshot));
        });
    }

    /// Last published state, or defaults before the first publication
    pub fn snapshot(&self) -> LightSnapshot {
        critical_section::with(|cs| self.state.borrow(cs).borrow().clone()).unwrap_or_default()
    }

    pub fn brightness(&self) -> u8 {
        self.snapshot().brightness
    }

    pub fn color(&self) -> Rgb {
        self.snapshot().color
    }

    pub fn effect_name(&self) -> EffectName {
        self.snapshot().effect
    }
}

impl Default for StatusBoard {
    fn default() -> Self {
        Self::new()
    }
}
