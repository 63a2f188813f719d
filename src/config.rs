//! Build-time configuration of the planter controller

use embassy_time::Duration;

/// Number of LEDs on the strip
pub const NUM_LEDS: usize = 120;

/// Number of contiguous LEDs treated as one visual unit
pub const GROUP_SIZE: usize = 7;

/// Capacity of the ripple pool
pub const MAX_RIPPLES: usize = 3;

/// Size of the reserved persistent region in bytes
pub const EEPROM_SIZE: usize = 1024;

/// Validity sentinel of the settings record
pub const SETTINGS_MAGIC: u16 = 0xAB54;

/// Minimum time between two non-forced settings writes
pub const MIN_WRITE_INTERVAL: Duration = Duration::from_millis(5_000);

/// Frame period of most effects
pub const DEFAULT_FRAME_PERIOD: Duration = Duration::from_millis(20);

/// Frame period of the ripple effect (slower perceived animation)
pub const RIPPLE_FRAME_PERIOD: Duration = Duration::from_millis(50);

pub const DEFAULT_MQTT_HOST: &str = "homeassistant.local";
pub const DEFAULT_MQTT_PORT: u16 = 1883;
pub const DEFAULT_MQTT_USER: &str = "user";
pub const DEFAULT_MQTT_PASS: &str = "pass";
pub const DEFAULT_HOSTNAME: &str = "led-planter";

/// Runtime configuration of the light controller
#[derive(Debug, Clone)]
pub struct ControllerConfig {
    /// Minimum time between two non-forced settings writes
    pub min_write_interval: Duration,
    /// Frame period of effects without their own pacing
    pub frame_period: Duration,
    /// Frame period of the ripple effect
    pub ripple_frame_period: Duration,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            min_write_interval: MIN_WRITE_INTERVAL,
            frame_period: DEFAULT_FRAME_PERIOD,
            ripple_frame_period: RIPPLE_FRAME_PERIOD,
        }
    }
}
