//! Commands from the HTTP and pub/sub adapters
//!
//! Adapters never touch the control state directly. They enqueue
//! [`LightCommand`]s which the control loop applies at the next tick
//! boundary, and read back the state the loop published to the
//! [`StatusBoard`].

use crate::channel::{Channel, Receiver, Sender};
use crate::color::{Rgb, rgb_from_u32};
use crate::effect::EffectId;
use crate::status::{LightSnapshot, StatusBoard};
use crate::storage::EffectName;

/// When a change should reach persistent storage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Persist {
    /// Write now, bypassing the write interval
    Immediate,
    /// Write when the write interval allows it
    Deferred,
}

impl Persist {
    pub const fn is_immediate(self) -> bool {
        matches!(self, Self::Immediate)
    }
}

/// A change to the control state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LightCommand {
    SetBrightness(u8, Persist),
    SetColor(Rgb, Persist),
    SetEffect(EffectName, Persist),
}

/// Command rejected at the adapter boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandError {
    /// The command queue is full; the loop has not drained it yet
    QueueFull,
    /// Effect name is not one of the known effects
    UnknownEffect,
}

/// Type alias for the command channel
pub type CommandChannel<const SIZE: usize> = Channel<LightCommand, SIZE>;

/// Type alias for command sender
pub type CommandSender<'a, const SIZE: usize> = Sender<'a, LightCommand, SIZE>;

/// Type alias for command receiver
pub type CommandReceiver<'a, const SIZE: usize> = Receiver<'a, LightCommand, SIZE>;

/// Hooks invoked by command adapters
pub trait CommandSink {
    fn on_brightness(&self, brightness: u8) -> Result<(), CommandError>;

    fn on_color(&self, color: Rgb) -> Result<(), CommandError>;

    /// Set the color from a packed `0xRRGGBB` value
    fn on_color_packed(&self, packed: u32) -> Result<(), CommandError> {
        self.on_color(rgb_from_u32(packed))
    }

    /// Select an effect by name; unknown names are rejected
    fn on_effect(&self, name: &str) -> Result<(), CommandError>;
}

/// Handle given to a command adapter
///
/// Each adapter picks the persistence policy of its changes once, at
/// construction.
#[derive(Clone, Copy)]
pub struct LightCommands<'a, const SIZE: usize> {
    sender: CommandSender<'a, SIZE>,
    status: &'a StatusBoard,
    persist: Persist,
}

impl<'a, const SIZE: usize> LightCommands<'a, SIZE> {
    pub const fn new(
        sender: CommandSender<'a, SIZE>,
        status: &'a StatusBoard,
        persist: Persist,
    ) -> Self {
        Self {
            sender,
            status,
            persist,
        }
    }

    pub fn brightness(&self) -> u8 {
        self.status.brightness()
    }

    pub fn color(&self) -> Rgb {
        self.status.color()
    }

    pub fn effect_name(&self) -> EffectName {
        self.status.effect_name()
    }

    /// Full state for status reports
    pub fn snapshot(&self) -> LightSnapshot {
        self.status.snapshot()
    }

    fn send(&self, command: LightCommand) -> Result<(), CommandError> {
        self.sender
            .try_send(command)
            .map_err(|_| CommandError::QueueFull)
    }
}

impl<const SIZE: usize> CommandSink for LightCommands<'_, SIZE> {
    fn on_brightness(&self, brightness: u8) -> Result<(), CommandError> {
        self.send(LightCommand::SetBrightness(brightness, self.persist))
    }

    fn on_color(&self, color: Rgb) -> Result<(), CommandError> {
        self.send(LightCommand::SetColor(color, self.persist))
    }

    fn on_effect(&self, name: &str) -> Result<(), CommandError> {
        let effect = EffectId::parse_from_str(name).ok_or(CommandError::UnknownEffect)?;
        self.send(LightCommand::SetEffect(
            EffectName::new(effect.as_str()),
            self.persist,
        ))
    }
}
