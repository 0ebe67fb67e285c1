//! Fixed-timestep frame pacing.
//!
//! Provides portable tick accounting without async/await or platform-specific timers.
//! The caller is responsible for sleeping/waiting between calls.

use embassy_time::{Duration, Instant};

#[cfg(feature = "esp32-log")]
use esp_println::println;

/// Default tick rate (60 Hz).
pub const DEFAULT_TICK_RATE: u64 = 60;

/// Default tick period based on the tick rate.
pub const DEFAULT_TICK_PERIOD: Duration = Duration::from_micros(1_000_000 / DEFAULT_TICK_RATE);

/// Default number of ticks that may be caught up after a stall.
///
/// If we fall further behind, the rest of the backlog is skipped.
pub const DEFAULT_MAX_CATCH_UP: u32 = 8;

/// Accumulates wall-clock time and hands it out in whole ticks.
///
/// # Usage
///
/// ```ignore
/// let mut clock = FrameClock::new(DEFAULT_TICK_PERIOD, DEFAULT_MAX_CATCH_UP);
///
/// loop {
///     clock.accumulate(Instant::from_millis(get_current_time_ms()));
///     while clock.take_tick() {
///         run_one_tick(clock.tick_period());
///     }
///     sleep_ms(clock.sleep_duration().as_millis());
/// }
/// ```
#[derive(Debug, Clone)]
pub struct FrameClock {
    tick_period: Duration,
    max_catch_up: u32,
    accumulator: Duration,
    last: Option<Instant>,
}

impl FrameClock {
    pub const fn new(tick_period: Duration, max_catch_up: u32) -> Self {
        Self {
            tick_period,
            max_catch_up: if max_catch_up == 0 { 1 } else { max_catch_up },
            accumulator: Duration::from_ticks(0),
            last: None,
        }
    }

    pub const fn tick_period(&self) -> Duration {
        self.tick_period
    }

    /// Time accumulated but not yet handed out as ticks
    pub const fn pending(&self) -> Duration {
        self.accumulator
    }

    /// Add the time elapsed since the previous call
    ///
    /// The first call only records `now`. A backlog longer than the catch-up
    /// limit is trimmed to the limit.
    pub fn accumulate(&mut self, now: Instant) {
        if let Some(last) = self.last {
            self.accumulator += now.saturating_duration_since(last);
        }
        self.last = Some(now);

        let max_backlog =
            Duration::from_ticks(self.tick_period.as_ticks() * u64::from(self.max_catch_up));
        if self.accumulator > max_backlog {
            #[cfg(feature = "esp32-log")]
            println!(
                "[frame] skipping {} ms of backlog",
                (self.accumulator - max_backlog).as_millis()
            );
            self.accumulator = max_backlog;
        }
    }

    /// Consume one tick if enough time has accumulated
    pub fn take_tick(&mut self) -> bool {
        if self.tick_period.as_ticks() == 0 || self.accumulator < self.tick_period {
            return false;
        }
        self.accumulator -= self.tick_period;
        true
    }

    /// Time until the next tick is due (may be zero if one is already due)
    pub fn sleep_duration(&self) -> Duration {
        self.tick_period
            .checked_sub(self.accumulator)
            .unwrap_or(Duration::from_ticks(0))
    }
}
