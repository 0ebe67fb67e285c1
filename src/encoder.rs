//! Rotary encoder volume control
//!
//! Both encoder pins fire on every edge, often in bursts. Only one
//! adjustment may be in flight at a time: an edge that arrives while the
//! previous one is still talking to the player is dropped, not queued, so
//! interrupt storms cannot run the volume away.

use core::cell::Cell;
use core::sync::atomic::{AtomicBool, Ordering};

use critical_section::Mutex;
use embassy_time::{Duration, Instant};

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::poller::PlayerError;
use crate::signals::InputSignals;

const DEFAULT_MIN_VOLUME: u8 = 0;
const DEFAULT_MAX_VOLUME: u8 = 100;
const DEFAULT_STEP: u8 = 3;
const DEFAULT_DIRECTION_LOCKOUT: Duration = Duration::from_millis(100);

const KEY_MAX_VOLUME: &str = "AUDIOVOLMAXLIMIT";
const KEY_STEP: &str = "AUDIOVOLCHANGESTEP";

/// Volume access used by the encoder
pub trait VolumeControl {
    /// Current volume in percent
    fn volume(&mut self) -> Result<u8, PlayerError>;

    /// Set the volume in percent
    fn set_volume(&mut self, volume: u8) -> Result<(), PlayerError>;
}

/// Encoder volume limits and step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncoderConfig {
    pub min_volume: u8,
    pub max_volume: u8,
    /// Volume change per detent. Each of the two edges of a detent applies half.
    pub step: u8,
    /// Turns in the opposite direction within this window are ignored
    pub direction_lockout: Duration,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl EncoderConfig {
    pub const fn new() -> Self {
        Self {
            min_volume: DEFAULT_MIN_VOLUME,
            max_volume: DEFAULT_MAX_VOLUME,
            step: DEFAULT_STEP,
            direction_lockout: DEFAULT_DIRECTION_LOCKOUT,
        }
    }

    /// Apply `KEY="value"` settings lines
    ///
    /// Reads the maximum volume and the step. The minimum volume setting is
    /// left alone so the encoder can always turn the volume down to zero.
    /// Returns the number of settings applied.
    pub fn apply_settings(&mut self, text: &str) -> usize {
        let mut applied = 0;
        for line in text.lines() {
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            let value = value.trim().trim_matches('"');
            let Ok(value) = value.parse::<u8>() else {
                continue;
            };
            match key.trim() {
                KEY_MAX_VOLUME => {
                    self.max_volume = value.min(DEFAULT_MAX_VOLUME);
                    applied += 1;
                }
                KEY_STEP => {
                    self.step = value;
                    applied += 1;
                }
                _ => {}
            }
        }
        applied
    }

    /// Volume change applied per edge
    const fn edge_step(&self) -> u8 {
        let half = self.step / 2;
        if half == 0 { 1 } else { half }
    }
}

/// Result of one encoder edge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncoderEvent {
    /// Another adjustment was in flight; the edge was dropped
    Dropped,
    /// The clock pin did not change level
    Unchanged,
    /// Direction reversal inside the lockout window
    Suppressed,
    /// The player volume was set
    Adjusted(u8),
    /// The player could not be read or written
    Failed(PlayerError),
}

#[derive(Debug, Clone, Copy)]
struct EncoderState {
    clk_last: bool,
    counter: i32,
    last_increase: Option<Instant>,
    last_decrease: Option<Instant>,
}

/// Releases the in-flight flag when the adjustment ends
struct InFlight<'a>(&'a AtomicBool);

impl<'a> InFlight<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Quadrature encoder driving the player volume
pub struct RotaryEncoder {
    config: EncoderConfig,
    in_flight: AtomicBool,
    state: Mutex<Cell<EncoderState>>,
}

impl RotaryEncoder {
    /// Create an encoder. `clk_level` is the clock pin level at startup.
    pub const fn new(config: EncoderConfig, clk_level: bool) -> Self {
        Self {
            config,
            in_flight: AtomicBool::new(false),
            state: Mutex::new(Cell::new(EncoderState {
                clk_last: clk_level,
                counter: 0,
                last_increase: None,
                last_decrease: None,
            })),
        }
    }

    pub const fn config(&self) -> &EncoderConfig {
        &self.config
    }

    /// Signed detent counter, for diagnostics
    pub fn counter(&self) -> i32 {
        critical_section::with(|cs| self.state.borrow(cs).get().counter)
    }

    /// Handle an edge on either pin
    ///
    /// `clk` and `dt` are the pin levels read in the handler. Adjusts the
    /// player volume and reports it to `signals` so the volume meter opens.
    pub fn on_edge<V: VolumeControl>(
        &self,
        clk: bool,
        dt: bool,
        now: Instant,
        player: &mut V,
        signals: &InputSignals,
    ) -> EncoderEvent {
        let Some(_guard) = InFlight::acquire(&self.in_flight) else {
            #[cfg(feature = "esp32-log")]
            println!("[encoder] edge dropped, adjustment in flight");
            return EncoderEvent::Dropped;
        };

        let mut state = critical_section::with(|cs| self.state.borrow(cs).get());
        if clk == state.clk_last {
            return EncoderEvent::Unchanged;
        }
        state.clk_last = clk;

        let event = self.adjust(&mut state, clk != dt, now, player);
        critical_section::with(|cs| self.state.borrow(cs).set(state));

        if let EncoderEvent::Adjusted(volume) = event {
            #[cfg(feature = "esp32-log")]
            println!("[encoder] volume {}", volume);
            signals.report_volume(volume);
        }
        event
    }

    fn adjust<V: VolumeControl>(
        &self,
        state: &mut EncoderState,
        increase: bool,
        now: Instant,
        player: &mut V,
    ) -> EncoderEvent {
        let current = match player.volume() {
            Ok(volume) => i16::from(volume),
            Err(error) => return EncoderEvent::Failed(error),
        };
        let step = i16::from(self.config.edge_step());
        let lockout = self.config.direction_lockout;
        let within_lockout =
            |last: Option<Instant>| last.is_some_and(|last| now.saturating_duration_since(last) <= lockout);

        let target = if increase {
            state.counter += 1;
            if within_lockout(state.last_decrease) {
                return EncoderEvent::Suppressed;
            }
            state.last_increase = Some(now);
            current + step
        } else {
            state.counter -= 1;
            if within_lockout(state.last_increase) {
                return EncoderEvent::Suppressed;
            }
            state.last_decrease = Some(now);
            current - step
        };

        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let volume = target
            .max(i16::from(self.config.min_volume))
            .min(i16::from(self.config.max_volume))
            .max(0) as u8;
        match player.set_volume(volume) {
            Ok(()) => EncoderEvent::Adjusted(volume),
            Err(error) => EncoderEvent::Failed(error),
        }
    }
}
