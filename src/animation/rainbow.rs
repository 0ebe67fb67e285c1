//! Rainbow effects
//!
//! Provides two rainbow variants built on the color wheel:
//! - `RainbowAnimation`: the whole ring shifts one wheel step per interval
//! - `RainbowCycleAnimation`: one full wheel spread over the ring, rotating
//!   at a fixed angular speed independent of the tick rate

use embassy_time::Duration;

use super::{Animation, Timeline};
use crate::color::{Rgb, wheel};

const WHEEL_STEPS: f32 = 256.0;
const MICROS_PER_SECOND: f32 = 1_000_000.0;

#[derive(Debug, Clone)]
pub struct RainbowAnimation {
    /// Minimum time between two wheel steps
    step: Duration,
    iter: u8,
    step_timer: Duration,
    started: bool,
}

impl RainbowAnimation {
    pub const fn new(step: Duration) -> Self {
        Self {
            step,
            iter: 0,
            step_timer: Duration::from_ticks(0),
            started: false,
        }
    }

    pub const fn iter(&self) -> u8 {
        self.iter
    }

    fn paint(&mut self, leds: &mut [Rgb]) {
        for (index, led) in leds.iter_mut().enumerate() {
            #[allow(clippy::cast_possible_truncation)]
            let pos = ((index + usize::from(self.iter)) & 255) as u8;
            *led = wheel(pos);
        }
        self.iter = self.iter.wrapping_add(1);
    }
}

impl Animation for RainbowAnimation {
    fn render(&mut self, _timeline: &Timeline, dt: Duration, leds: &mut [Rgb]) {
        if !self.started {
            self.started = true;
            self.paint(leds);
            return;
        }

        self.step_timer += dt;
        if self.step_timer >= self.step {
            self.step_timer = Duration::from_ticks(0);
            self.paint(leds);
        }
    }

    fn reset(&mut self) {
        self.iter = 0;
        self.step_timer = Duration::from_ticks(0);
        self.started = false;
    }
}

/// Rainbow spread evenly over the ring
#[derive(Debug, Clone)]
pub struct RainbowCycleAnimation {
    /// Wheel steps per second, negative values rotate backward
    speed: f32,
    /// Reverse the LED order
    invert: bool,
    /// Wheel offset in `[0, 256)`
    phase: f32,
}

impl RainbowCycleAnimation {
    pub const fn new(speed: f32) -> Self {
        Self {
            speed,
            invert: false,
            phase: 0.0,
        }
    }

    #[must_use]
    pub const fn with_inverse(mut self) -> Self {
        self.invert = true;
        self
    }

    pub const fn is_inverted(&self) -> bool {
        self.invert
    }

    pub const fn phase(&self) -> f32 {
        self.phase
    }
}

impl Animation for RainbowCycleAnimation {
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    fn render(&mut self, _timeline: &Timeline, dt: Duration, leds: &mut [Rgb]) {
        let seconds = dt.as_micros() as f32 / MICROS_PER_SECOND;
        let mut phase = libm::fmodf(self.phase + seconds * self.speed, WHEEL_STEPS);
        if phase < 0.0 {
            phase += WHEEL_STEPS;
        }
        self.phase = phase;

        let count = leds.len();
        let offset = phase as usize;
        for i in 0..count {
            let pos = ((i * 256 / count) + offset) & 255;
            let index = if self.invert { count - 1 - i } else { i };
            leds[index] = wheel(pos as u8);
        }
    }

    fn reset(&mut self) {
        self.phase = 0.0;
    }
}
