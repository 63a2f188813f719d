use super::layout::{
    HOSTNAME, MQTT_HOST, MQTT_PASSWORD, MQTT_PORT, MQTT_USER, Region, WIFI_PASSWORD, WIFI_SSID,
};
use super::text::BoundedText;
use super::{ByteStorage, StorageError};
use crate::config::{
    DEFAULT_HOSTNAME, DEFAULT_MQTT_HOST, DEFAULT_MQTT_PASS, DEFAULT_MQTT_PORT, DEFAULT_MQTT_USER,
};

/// Network identity stored ahead of the settings record
///
/// Text fields are NUL-terminated within their region, so each keeps one
/// byte for the terminator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceConfig {
    pub wifi_ssid: BoundedText<31>,
    pub wifi_password: BoundedText<63>,
    pub mqtt_host: BoundedText<63>,
    pub mqtt_port: u16,
    pub mqtt_user: BoundedText<31>,
    pub mqtt_password: BoundedText<31>,
    pub hostname: BoundedText<31>,
}

impl DeviceConfig {
    /// Read the configuration, filling in defaults for empty fields
    ///
    /// An erased port (`0xFFFF`) falls back to the default port. An empty
    /// SSID is kept empty: it means no network has been configured.
    pub fn load<S: ByteStorage>(storage: &mut S) -> Result<Self, StorageError> {
        let port_bytes: [u8; 2] = read_field(storage, MQTT_PORT)?;
        let mqtt_port = match u16::from_be_bytes(port_bytes) {
            0xFFFF => DEFAULT_MQTT_PORT,
            port => port,
        };

        Ok(Self {
            wifi_ssid: read_text::<_, 32, 31>(storage, WIFI_SSID)?,
            wifi_password: read_text::<_, 64, 63>(storage, WIFI_PASSWORD)?,
            mqtt_host: or_default(read_text::<_, 64, 63>(storage, MQTT_HOST)?, DEFAULT_MQTT_HOST),
            mqtt_port,
            mqtt_user: or_default(read_text::<_, 32, 31>(storage, MQTT_USER)?, DEFAULT_MQTT_USER),
            mqtt_password: or_default(
                read_text::<_, 32, 31>(storage, MQTT_PASSWORD)?,
                DEFAULT_MQTT_PASS,
            ),
            hostname: or_default(read_text::<_, 32, 31>(storage, HOSTNAME)?, DEFAULT_HOSTNAME),
        })
    }

    /// Whether WiFi station credentials are present
    pub fn has_wifi_credentials(&self) -> bool {
        !self.wifi_ssid.is_empty()
    }
}

fn read_field<S: ByteStorage, const LEN: usize>(
    storage: &mut S,
    region: Region,
) -> Result<[u8; LEN], StorageError> {
    debug_assert_eq!(region.len, LEN);
    let mut field = [0u8; LEN];
    storage.read_into(region.offset, &mut field)?;
    Ok(field)
}

/// Erased flash reads as `0xFF`, which is not valid UTF-8 and decodes empty
fn read_text<S: ByteStorage, const LEN: usize, const CAP: usize>(
    storage: &mut S,
    region: Region,
) -> Result<BoundedText<CAP>, StorageError> {
    let field: [u8; LEN] = read_field(storage, region)?;
    Ok(BoundedText::from_padded(&field))
}

fn or_default<const CAP: usize>(text: BoundedText<CAP>, default: &str) -> BoundedText<CAP> {
    if text.is_empty() {
        BoundedText::new(default)
    } else {
        text
    }
}
