#![no_std]

/// Diagnostic line on the serial console
///
/// Compiles to nothing unless the `log` feature is enabled; the arguments
/// are still type-checked.
#[cfg(feature = "log")]
macro_rules! diag {
    ($($arg:tt)*) => {
        esp_println::println!($($arg)*)
    };
}

#[cfg(not(feature = "log"))]
macro_rules! diag {
    ($($arg:tt)*) => {{
        let _ = format_args!($($arg)*);
    }};
}

pub mod channel;
pub mod color;
pub mod command;
pub mod config;
pub mod controller;
pub mod effect;
mod filter;
pub mod frame;
pub mod frame_scheduler;
pub mod math8;
pub mod random;
pub mod status;
pub mod storage;

pub use command::{
    CommandChannel, CommandError, CommandReceiver, CommandSender, CommandSink, LightCommand,
    LightCommands, Persist,
};
pub use config::ControllerConfig;
pub use controller::{ControlState, LightController};
pub use effect::{Effect, EffectEngine, EffectId};
pub use frame::FrameBuffer;
pub use frame_scheduler::{FrameResult, FrameScheduler};
pub use random::{RandomSource, SplitMix};
pub use status::{LightSnapshot, StatusBoard};
pub use storage::{
    ByteStorage, DeviceConfig, MemoryStorage, SaveOutcome, SettingsRecord, SettingsStore,
    StorageError,
};

pub use color::{Hsv, Rgb};
pub use embassy_time::{Duration, Instant};

/// Abstract LED strip driver
///
/// Implement this trait for the addressable strip on the target board.
/// The frame scheduler is generic over it.
pub trait StripDriver {
    /// Push one frame to the strip
    fn transmit(&mut self, frame: &[Rgb]);
}
