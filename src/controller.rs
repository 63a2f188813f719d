use embassy_time::{Duration, Instant};

use crate::color::Rgb;
use crate::command::{CommandReceiver, LightCommand};
use crate::config::ControllerConfig;
use crate::effect::{EffectEngine, EffectId};
use crate::filter::BrightnessFilter;
use crate::frame::FrameBuffer;
use crate::random::RandomSource;
use crate::status::{LightSnapshot, StatusBoard};
use crate::storage::{ByteStorage, EffectName, SaveOutcome, SettingsStore};

/// Control-state triple read by the loop once per tick
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlState {
    pub brightness: u8,
    pub color: Rgb,
    pub effect_name: EffectName,
    /// Parsed effect; `None` for names no generator knows, which hold the
    /// current frame
    pub effect: Option<EffectId>,
}

impl ControlState {
    fn snapshot(&self) -> LightSnapshot {
        LightSnapshot {
            brightness: self.brightness,
            color: self.color,
            effect: self.effect_name.clone(),
        }
    }
}

/// Light controller - owns the control state, settings and effect engine
///
/// All mutation happens inside [`LightController::render`]: queued commands
/// are applied first, then the selected effect renders one frame. Nothing
/// else writes the control state or the frame buffer.
pub struct LightController<
    'a,
    S: ByteStorage,
    R: RandomSource,
    const N: usize,
    const COMMAND_QUEUE_SIZE: usize,
> {
    // External dependencies and configuration
    commands: CommandReceiver<'a, COMMAND_QUEUE_SIZE>,
    status: &'a StatusBoard,
    config: ControllerConfig,

    // Internal state
    settings: SettingsStore<S>,
    state: ControlState,
    engine: EffectEngine<R>,
    frame: FrameBuffer<N>,
    output: [Rgb; N],
    brightness: BrightnessFilter,
}

impl<'a, S: ByteStorage, R: RandomSource, const N: usize, const COMMAND_QUEUE_SIZE: usize>
    LightController<'a, S, R, N, COMMAND_QUEUE_SIZE>
{
    /// Create a controller, loading the settings from `storage`
    ///
    /// The control state starts from the persisted settings and is published
    /// to `status` right away.
    pub fn new(
        storage: S,
        rng: R,
        commands: CommandReceiver<'a, COMMAND_QUEUE_SIZE>,
        status: &'a StatusBoard,
        config: &ControllerConfig,
    ) -> Self {
        let mut settings = SettingsStore::with_write_interval(storage, config.min_write_interval);
        settings.initialize();

        let effect_name = EffectName::new(settings.effect());
        let effect = EffectId::parse_from_str(effect_name.as_str());
        if effect.is_none() {
            diag!("controller: stored effect '{}' is unknown, holding frame", effect_name);
        }
        let state = ControlState {
            brightness: settings.brightness(),
            color: settings.color(),
            effect_name,
            effect,
        };
        status.publish(state.snapshot());

        Self {
            commands,
            status,
            config: config.clone(),
            brightness: BrightnessFilter::new(state.brightness),
            settings,
            state,
            engine: EffectEngine::new(rng),
            frame: FrameBuffer::new(),
            output: [Rgb::default(); N],
        }
    }

    /// Process one tick
    ///
    /// Applies queued commands, flushes a deferred settings write if its
    /// interval has passed, renders the active effect and returns the
    /// brightness-scaled frame for the strip.
    pub fn render(&mut self, now: Instant) -> &[Rgb] {
        self.process_commands(now);
        self.settings.flush_pending(now);

        self.engine
            .render(self.state.effect, self.frame.pixels_mut(), self.state.color);
        self.brightness.apply(self.frame.pixels(), &mut self.output);

        &self.output
    }

    /// Apply a single command to the control state and persist it
    pub fn apply(&mut self, command: LightCommand, now: Instant) -> SaveOutcome {
        let outcome = match command {
            LightCommand::SetBrightness(brightness, persist) => {
                self.state.brightness = brightness;
                self.brightness.set(brightness);
                self.settings
                    .set_brightness(brightness, persist.is_immediate(), now)
            }
            LightCommand::SetColor(color, persist) => {
                self.state.color = color;
                self.settings.set_color(color, persist.is_immediate(), now)
            }
            LightCommand::SetEffect(name, persist) => {
                self.state.effect = EffectId::parse_from_str(name.as_str());
                if self.state.effect.is_none() {
                    diag!("controller: unknown effect '{}', holding frame", name);
                }
                let outcome = self
                    .settings
                    .set_effect(name.as_str(), persist.is_immediate(), now);
                self.state.effect_name = name;
                outcome
            }
        };

        self.status.publish(self.state.snapshot());
        outcome
    }

    /// Time until the next frame of the active effect is due
    pub fn frame_period(&self) -> Duration {
        match self.state.effect {
            Some(EffectId::Ripple) => self.config.ripple_frame_period,
            _ => self.config.frame_period,
        }
    }

    pub fn state(&self) -> &ControlState {
        &self.state
    }

    /// Unscaled animation buffer
    pub fn frame(&self) -> &FrameBuffer<N> {
        &self.frame
    }

    pub fn settings(&self) -> &SettingsStore<S> {
        &self.settings
    }

    pub fn engine(&self) -> &EffectEngine<R> {
        &self.engine
    }

    /// Drain the command queue (non-blocking)
    fn process_commands(&mut self, now: Instant) {
        while let Ok(command) = self.commands.try_receive() {
            self.apply(command, now);
        }
    }
}
