mod tests {
    use led_planter::config::EEPROM_SIZE;
    use led_planter::storage::layout::{HOSTNAME, MQTT_PORT, WIFI_SSID};
    use led_planter::storage::{ByteStorage, DeviceConfig, MemoryStorage};

    #[test]
    fn test_erased_storage_uses_defaults() {
        let mut storage = MemoryStorage::<EEPROM_SIZE>::erased();
        let config = DeviceConfig::load(&mut storage).unwrap();

        assert!(!config.has_wifi_credentials());
        assert_eq!(config.wifi_ssid, "");
        assert_eq!(config.mqtt_host, "homeassistant.local");
        assert_eq!(config.mqtt_port, 1883);
        assert_eq!(config.mqtt_user, "user");
        assert_eq!(config.mqtt_password, "pass");
        assert_eq!(config.hostname, "led-planter");
    }

    #[test]
    fn test_stored_values_are_read() {
        let mut storage = MemoryStorage::<EEPROM_SIZE>::erased();
        storage.write_from(WIFI_SSID.offset, b"garden\0").unwrap();
        storage.write_from(MQTT_PORT.offset, &[0x1F, 0x90]).unwrap();
        storage.write_from(HOSTNAME.offset, b"planter-2\0").unwrap();

        let config = DeviceConfig::load(&mut storage).unwrap();
        assert!(config.has_wifi_credentials());
        assert_eq!(config.wifi_ssid, "garden");
        assert_eq!(config.mqtt_port, 8080);
        assert_eq!(config.hostname, "planter-2");
        assert_eq!(config.mqtt_host, "homeassistant.local");
    }
}
