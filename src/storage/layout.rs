//! Fixed byte layout of the persistent region
//!
//! Offsets are shared with earlier firmware builds and must not move.

use crate::config::EEPROM_SIZE;

use super::record::SETTINGS_RECORD_SIZE;

/// A contiguous field of the persistent region
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub offset: usize,
    pub len: usize,
}

impl Region {
    pub const fn new(offset: usize, len: usize) -> Self {
        Self { offset, len }
    }

    /// First address past the field
    pub const fn end(self) -> usize {
        self.offset + self.len
    }
}

pub const WIFI_SSID: Region = Region::new(0, 32);
pub const WIFI_PASSWORD: Region = Region::new(32, 64);
pub const MQTT_HOST: Region = Region::new(96, 64);
/// Big-endian port number
pub const MQTT_PORT: Region = Region::new(160, 2);
pub const MQTT_USER: Region = Region::new(164, 32);
pub const MQTT_PASSWORD: Region = Region::new(196, 32);
pub const HOSTNAME: Region = Region::new(228, 32);
pub const SETTINGS: Region = Region::new(292, SETTINGS_RECORD_SIZE);

const _: () = assert!(SETTINGS.end() <= EEPROM_SIZE);
const _: () = assert!(HOSTNAME.end() <= SETTINGS.offset);
