//! Shared timing record of every animation
//!
//! Tracks elapsed time since the last reset and turns it into a 0-255
//! progress value. Once the duration is exceeded the timeline either stays
//! finished, restarts, or reverses direction, depending on [`Repeat`].

use embassy_time::Duration;

use crate::math8::progress8;

/// Behavior once the elapsed time exceeds the duration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Repeat {
    /// Run once and report finished
    Once,
    /// Restart from the beginning
    Loop,
    /// Restart in the opposite direction
    PingPong,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeline {
    /// Time ticked since the last reset (or the last repeat)
    elapsed: Duration,
    /// Length of one run, `None` for unbounded animations
    duration: Option<Duration>,
    repeat: Repeat,
    /// Direction of the progress value, flipped by ping-pong repeats
    forward: bool,
    /// Scheduler must not replace the animation until it finishes
    wait_for_finish: bool,
}

impl Timeline {
    /// Timeline without a duration. Never finishes.
    pub const fn unbounded() -> Self {
        Self::new(None, Repeat::Once)
    }

    /// Timeline that finishes once `duration` has been exceeded
    pub const fn once(duration: Duration) -> Self {
        Self::new(Some(duration), Repeat::Once)
    }

    /// Timeline that restarts every `duration`
    pub const fn looping(duration: Duration) -> Self {
        Self::new(Some(duration), Repeat::Loop)
    }

    /// Timeline that reverses direction every `duration`
    pub const fn ping_pong(duration: Duration) -> Self {
        Self::new(Some(duration), Repeat::PingPong)
    }

    const fn new(duration: Option<Duration>, repeat: Repeat) -> Self {
        Self {
            elapsed: Duration::from_ticks(0),
            duration,
            repeat,
            forward: true,
            wait_for_finish: false,
        }
    }

    /// Mark the animation as atomic for the scheduler
    #[must_use]
    pub const fn with_wait_for_finish(mut self) -> Self {
        self.wait_for_finish = true;
        self
    }

    pub const fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub const fn duration(&self) -> Option<Duration> {
        self.duration
    }

    pub const fn repeat(&self) -> Repeat {
        self.repeat
    }

    pub const fn is_forward(&self) -> bool {
        self.forward
    }

    pub const fn waits_for_finish(&self) -> bool {
        self.wait_for_finish
    }

    /// Advance by one tick
    pub fn advance(&mut self, dt: Duration) {
        self.elapsed += dt;
        if !self.is_over() {
            return;
        }
        match self.repeat {
            Repeat::Once => {}
            Repeat::Loop => {
                self.elapsed = Duration::from_ticks(0);
            }
            Repeat::PingPong => {
                self.forward = !self.forward;
                self.elapsed = Duration::from_ticks(0);
            }
        }
    }

    /// Zero the elapsed time and restore the forward direction
    pub fn reset(&mut self) {
        self.elapsed = Duration::from_ticks(0);
        self.forward = true;
    }

    /// Only one-shot timelines with a duration ever finish.
    pub fn is_finished(&self) -> bool {
        self.repeat == Repeat::Once && self.is_over()
    }

    /// Progress through the current run (0-255), reversed when running backward.
    ///
    /// Unbounded timelines stay at 0. A zero duration is complete at once.
    pub fn alpha(&self) -> u8 {
        let Some(duration) = self.duration else {
            return 0;
        };
        let progress = progress8(self.elapsed, duration);
        if self.forward { progress } else { 255 - progress }
    }

    fn is_over(&self) -> bool {
        self.duration.is_some_and(|duration| self.elapsed > duration)
    }
}
