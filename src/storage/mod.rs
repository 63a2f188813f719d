//! Persistent settings storage
//!
//! The controller persists its light settings into a byte-addressable
//! region (EEPROM emulation on the ESP32). The region layout is fixed, see
//! [`layout`].

mod device_config;
pub mod layout;
mod record;
mod settings;
mod text;

pub use device_config::DeviceConfig;
pub use record::{DEFAULT_EFFECT, EFFECT_FIELD_SIZE, EffectName, SETTINGS_RECORD_SIZE, SettingsRecord};
pub use settings::{LoadOutcome, SaveOutcome, SettingsStore};
pub use text::BoundedText;

/// Storage failures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageError {
    /// Address outside of the storage region
    OutOfRange,
    /// Device read failed
    Read,
    /// Device write failed
    Write,
    /// Changes could not be made durable
    Commit,
    /// Read-back after commit differs from what was written
    VerificationMismatch,
}

/// Byte-addressable persistent storage
///
/// Writes are staged until [`ByteStorage::commit`] makes them durable. A
/// failed commit leaves the previously committed contents in place.
pub trait ByteStorage {
    /// Read one byte
    fn read(&mut self, addr: usize) -> Result<u8, StorageError>;

    /// Stage one byte
    fn write(&mut self, addr: usize, value: u8) -> Result<(), StorageError>;

    /// Make staged writes durable
    fn commit(&mut self) -> Result<(), StorageError>;

    /// Read a contiguous run of bytes starting at `addr`
    fn read_into(&mut self, addr: usize, buffer: &mut [u8]) -> Result<(), StorageError> {
        for (offset, byte) in buffer.iter_mut().enumerate() {
            *byte = self.read(addr + offset)?;
        }
        Ok(())
    }

    /// Stage a contiguous run of bytes starting at `addr`
    fn write_from(&mut self, addr: usize, data: &[u8]) -> Result<(), StorageError> {
        for (offset, byte) in data.iter().enumerate() {
            self.write(addr + offset, *byte)?;
        }
        Ok(())
    }
}

/// Value of a byte that was never written
pub const ERASED_BYTE: u8 = 0xFF;

/// RAM-backed storage with a staged and a committed image
///
/// Behaves like the ESP32 EEPROM emulation: reads and writes go to a RAM
/// cache, `commit` copies the cache to the durable image.
#[derive(Debug, Clone)]
pub struct MemoryStorage<const SIZE: usize> {
    staged: [u8; SIZE],
    committed: [u8; SIZE],
    commits: usize,
}

impl<const SIZE: usize> MemoryStorage<SIZE> {
    /// Storage in the erased state (all `0xFF`)
    pub const fn erased() -> Self {
        Self::from_image([ERASED_BYTE; SIZE])
    }

    /// Storage whose durable image is `image`
    pub const fn from_image(image: [u8; SIZE]) -> Self {
        Self {
            staged: image,
            committed: image,
            commits: 0,
        }
    }

    /// Durable contents
    pub const fn committed(&self) -> &[u8; SIZE] {
        &self.committed
    }

    /// Number of successful commits so far
    pub const fn commit_count(&self) -> usize {
        self.commits
    }

    /// Drop uncommitted writes, as a power loss would
    pub fn power_cycle(&mut self) {
        self.staged = self.committed;
    }
}

impl<const SIZE: usize> Default for MemoryStorage<SIZE> {
    fn default() -> Self {
        Self::erased()
    }
}

impl<const SIZE: usize> ByteStorage for MemoryStorage<SIZE> {
    fn read(&mut self, addr: usize) -> Result<u8, StorageError> {
        self.staged.get(addr).copied().ok_or(StorageError::OutOfRange)
    }

    fn write(&mut self, addr: usize, value: u8) -> Result<(), StorageError> {
        let byte = self.staged.get_mut(addr).ok_or(StorageError::OutOfRange)?;
        *byte = value;
        Ok(())
    }

    fn commit(&mut self) -> Result<(), StorageError> {
        self.committed = self.staged;
        self.commits += 1;
        Ok(())
    }
}
