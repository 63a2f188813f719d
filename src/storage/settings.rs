//! Settings store with write-wear mitigation
//!
//! Flash and EEPROM cells have a finite write endurance, so the store avoids
//! writes in two ways:
//! - setters skip the write entirely when the value did not change;
//! - non-forced saves are throttled to one per write interval. A throttled
//!   save is remembered and flushed by [`SettingsStore::flush_pending`] once
//!   the interval has elapsed.
//!
//! Forced saves bypass the throttle for changes that must survive an
//! imminent restart.

use embassy_time::{Duration, Instant};

use super::layout::SETTINGS;
use super::record::{EffectName, RawSettingsRecord, SETTINGS_RECORD_SIZE, SettingsRecord};
use super::{ByteStorage, StorageError};
use crate::color::Rgb;
use crate::config::{MIN_WRITE_INTERVAL, SETTINGS_MAGIC};

/// Result of a save request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// Value was already current, nothing to write
    Unchanged,
    /// The store was used before [`SettingsStore::initialize`]
    Uninitialized,
    /// Throttled; the record will be written by a later flush
    Deferred,
    /// Record written, committed and verified
    Written,
    /// Write was attempted and failed. Not retried.
    ///
    /// `VerificationMismatch` means the commit succeeded but the read-back
    /// differed.
    Failed(StorageError),
}

impl SaveOutcome {
    pub const fn is_written(self) -> bool {
        matches!(self, Self::Written)
    }
}

/// Result of loading the record from storage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// A valid record was found and adopted
    Restored,
    /// The record was absent or corrupt; defaults were adopted and written
    Defaulted(SaveOutcome),
    /// The record could not be read; defaults are used in memory and
    /// storage is left untouched
    ReadFailed(StorageError),
}

/// Owner of the persisted settings record and its in-memory shadow
pub struct SettingsStore<S: ByteStorage> {
    storage: S,
    shadow: SettingsRecord,
    initialized: bool,
    pending: bool,
    min_write_interval: Duration,
}

impl<S: ByteStorage> SettingsStore<S> {
    /// Create a store using the default write interval
    ///
    /// Getters return defaults until [`SettingsStore::initialize`] is called.
    pub fn new(storage: S) -> Self {
        Self::with_write_interval(storage, MIN_WRITE_INTERVAL)
    }

    pub fn with_write_interval(storage: S, min_write_interval: Duration) -> Self {
        Self {
            storage,
            shadow: SettingsRecord::default(),
            initialized: false,
            pending: false,
            min_write_interval,
        }
    }

    /// Load the record, or adopt and persist defaults
    ///
    /// Only the first call does anything; later calls return `None`.
    pub fn initialize(&mut self) -> Option<LoadOutcome> {
        if self.initialized {
            return None;
        }
        let outcome = self.load();
        self.initialized = true;
        Some(outcome)
    }

    /// Read the record from storage into the shadow
    ///
    /// A magic mismatch is treated as absent: the defaults are adopted and
    /// written immediately, regardless of the write interval. An unreadable
    /// record adopts the defaults in memory only, so a transient read error
    /// never overwrites a record that may still be valid.
    pub fn load(&mut self) -> LoadOutcome {
        diag!("settings: reading record");
        self.pending = false;

        let raw = match self.read_raw() {
            Ok(raw) => raw,
            Err(err) => {
                diag!("settings: read failed ({:?}), using defaults in memory", err);
                self.shadow = SettingsRecord::default();
                return LoadOutcome::ReadFailed(err);
            }
        };

        if raw.magic() == SETTINGS_MAGIC {
            self.shadow = SettingsRecord::decode(&raw);
            diag!("settings: valid record found");
            dump("settings: current", &self.shadow);
            return LoadOutcome::Restored;
        }

        diag!(
            "settings: invalid magic 0x{:04X} (expected 0x{:04X}), using defaults",
            raw.magic(),
            SETTINGS_MAGIC
        );
        self.shadow = SettingsRecord::default();
        let outcome = match self.write_record() {
            Ok(()) => SaveOutcome::Written,
            Err(err) => {
                diag!("settings: saving defaults failed: {:?}", err);
                SaveOutcome::Failed(err)
            }
        };
        dump("settings: current", &self.shadow);
        LoadOutcome::Defaulted(outcome)
    }

    /// Write the shadow to storage
    ///
    /// Unless `force` is set, the write only happens when the write interval
    /// has passed since the last successful write; otherwise it is deferred
    /// to [`SettingsStore::flush_pending`]. Failures are reported through
    /// the returned outcome and never retried.
    pub fn save(&mut self, force: bool, now: Instant) -> SaveOutcome {
        if !self.initialized {
            diag!("settings: save requested before initialization");
            return SaveOutcome::Uninitialized;
        }

        if !force && !self.interval_elapsed(now) {
            diag!("settings: write throttled, deferring");
            self.pending = true;
            return SaveOutcome::Deferred;
        }

        dump("settings: saving", &self.shadow);
        self.shadow.last_write = timestamp(now);
        self.shadow.magic = SETTINGS_MAGIC;
        self.pending = false;

        match self.write_record() {
            Ok(()) => {
                diag!("settings: saved");
                SaveOutcome::Written
            }
            Err(err) => {
                diag!("settings: save failed: {:?}", err);
                SaveOutcome::Failed(err)
            }
        }
    }

    /// Write a deferred change once the write interval allows it
    ///
    /// Returns `None` when nothing is pending or the interval has not
    /// elapsed yet.
    pub fn flush_pending(&mut self, now: Instant) -> Option<SaveOutcome> {
        if !self.pending || !self.interval_elapsed(now) {
            return None;
        }
        Some(self.save(false, now))
    }

    pub fn set_brightness(&mut self, value: u8, immediate: bool, now: Instant) -> SaveOutcome {
        if !self.accepts_changes() {
            return SaveOutcome::Uninitialized;
        }
        if self.shadow.brightness == value {
            return SaveOutcome::Unchanged;
        }
        diag!("settings: brightness -> {}", value);
        self.shadow.brightness = value;
        self.save(immediate, now)
    }

    pub fn set_color(&mut self, color: Rgb, immediate: bool, now: Instant) -> SaveOutcome {
        if !self.accepts_changes() {
            return SaveOutcome::Uninitialized;
        }
        if self.shadow.color == color {
            return SaveOutcome::Unchanged;
        }
        diag!("settings: color -> R:{} G:{} B:{}", color.r, color.g, color.b);
        self.shadow.color = color;
        self.save(immediate, now)
    }

    /// Set the effect name, truncated to the field capacity
    pub fn set_effect(&mut self, name: &str, immediate: bool, now: Instant) -> SaveOutcome {
        if !self.accepts_changes() {
            return SaveOutcome::Uninitialized;
        }
        let name = EffectName::new(name);
        if self.shadow.effect == name {
            return SaveOutcome::Unchanged;
        }
        diag!("settings: effect -> {}", name);
        self.shadow.effect = name;
        self.save(immediate, now)
    }

    pub fn brightness(&self) -> u8 {
        self.shadow.brightness
    }

    pub fn color(&self) -> Rgb {
        self.shadow.color
    }

    pub fn effect(&self) -> &str {
        self.shadow.effect.as_str()
    }

    /// Copy of the shadow record
    pub fn record(&self) -> SettingsRecord {
        self.shadow.clone()
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Whether a throttled change is waiting to be written
    pub fn is_pending(&self) -> bool {
        self.pending
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }

    pub fn into_storage(self) -> S {
        self.storage
    }

    fn accepts_changes(&self) -> bool {
        if !self.initialized {
            diag!("settings: change ignored, store not initialized");
        }
        self.initialized
    }

    fn interval_elapsed(&self, now: Instant) -> bool {
        let elapsed = timestamp(now).wrapping_sub(self.shadow.last_write);
        u64::from(elapsed) >= self.min_write_interval.as_millis()
    }

    fn read_raw(&mut self) -> Result<RawSettingsRecord, StorageError> {
        let mut buffer = [0u8; SETTINGS_RECORD_SIZE];
        self.storage.read_into(SETTINGS.offset, &mut buffer)?;
        Ok(bytemuck::pod_read_unaligned(&buffer))
    }

    /// Write, commit and verify the shadow record
    fn write_record(&mut self) -> Result<(), StorageError> {
        let raw = self.shadow.encode();
        self.storage.write_from(SETTINGS.offset, bytemuck::bytes_of(&raw))?;
        self.storage.commit()?;

        let stored = self.read_raw()?;
        if !stored.same_contents(&raw) {
            diag!("settings: verification failed");
            dump("settings: verification read", &SettingsRecord::decode(&stored));
            return Err(StorageError::VerificationMismatch);
        }
        Ok(())
    }
}

/// Wrapping millisecond timestamp stored in the record
#[allow(clippy::cast_possible_truncation)]
fn timestamp(now: Instant) -> u32 {
    now.as_millis() as u32
}

fn dump(prefix: &str, record: &SettingsRecord) {
    diag!(
        "{}: magic=0x{:04X} brightness={} color=({},{},{}) effect={} last_write={}",
        prefix,
        record.magic,
        record.brightness,
        record.color.r,
        record.color.g,
        record.color.b,
        record.effect,
        record.last_write
    );
}
