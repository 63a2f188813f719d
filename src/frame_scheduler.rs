//! Frame pacing for the cooperative control loop
//!
//! The scheduler never sleeps itself. Each tick renders and transmits one
//! frame, then tells the caller how long to yield; network callbacks run
//! during that yield, between frames.

use embassy_time::{Duration, Instant};

use crate::StripDriver;
use crate::controller::LightController;
use crate::random::RandomSource;
use crate::storage::ByteStorage;

/// Result of a frame tick operation.
#[derive(Debug, Clone, Copy)]
pub struct FrameResult {
    /// The deadline for the next frame.
    pub next_deadline: Instant,
    /// How long to yield until the next frame (zero if behind schedule).
    pub sleep_duration: Duration,
}

/// Drives a [`LightController`] and a [`StripDriver`] one frame at a time
///
/// # Usage
///
/// ```ignore
/// let mut scheduler = FrameScheduler::new(controller, driver);
///
/// loop {
///     let result = scheduler.tick(Instant::now());
///     // Service network events while waiting
///     Timer::after(result.sleep_duration).await;
/// }
/// ```
pub struct FrameScheduler<
    'a,
    D: StripDriver,
    S: ByteStorage,
    R: RandomSource,
    const N: usize,
    const COMMAND_QUEUE_SIZE: usize,
> {
    driver: D,
    controller: LightController<'a, S, R, N, COMMAND_QUEUE_SIZE>,
    next_frame: Instant,
}

impl<
    'a,
    D: StripDriver,
    S: ByteStorage,
    R: RandomSource,
    const N: usize,
    const COMMAND_QUEUE_SIZE: usize,
> FrameScheduler<'a, D, S, R, N, COMMAND_QUEUE_SIZE>
{
    pub fn new(controller: LightController<'a, S, R, N, COMMAND_QUEUE_SIZE>, driver: D) -> Self {
        Self {
            driver,
            controller,
            next_frame: Instant::from_millis(0),
        }
    }

    /// Render and transmit one frame, returning when the next one is due
    ///
    /// The frame period follows the effect that is active after this frame's
    /// commands were applied. If the loop has fallen more than two periods
    /// behind, the schedule restarts from `now` instead of bursting frames
    /// to catch up.
    pub fn tick(&mut self, now: Instant) -> FrameResult {
        let frame = self.controller.render(now);
        self.driver.transmit(frame);

        let frame_period = self.controller.frame_period();
        let max_drift = frame_period * 2;
        if now > self.next_frame + max_drift {
            self.next_frame = now;
        }
        self.next_frame += frame_period;

        let sleep_duration = self
            .next_frame
            .checked_duration_since(now)
            .unwrap_or(Duration::from_millis(0));

        FrameResult {
            next_deadline: self.next_frame,
            sleep_duration,
        }
    }

    pub fn controller(&self) -> &LightController<'a, S, R, N, COMMAND_QUEUE_SIZE> {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut LightController<'a, S, R, N, COMMAND_QUEUE_SIZE> {
        &mut self.controller
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }
}
