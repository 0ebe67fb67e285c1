//! Progressive color wipe
//!
//! Paints one more LED every `duration / count` of ticked time, leaving the
//! rest of the frame untouched.

use embassy_time::Duration;

use super::{Animation, Timeline};
use crate::{color::Rgb, math8::portions};

#[derive(Debug, Clone)]
pub struct ColorWipeAnimation {
    color: Rgb,
    /// Number of LEDs painted in the current run
    painted: usize,
}

impl ColorWipeAnimation {
    pub const fn new(color: Rgb) -> Self {
        Self { color, painted: 0 }
    }

    pub const fn painted(&self) -> usize {
        self.painted
    }
}

impl Animation for ColorWipeAnimation {
    fn render(&mut self, timeline: &Timeline, _dt: Duration, leds: &mut [Rgb]) {
        // Unbounded wipes complete on the first tick
        let duration = timeline.duration().unwrap_or(Duration::from_ticks(0));
        let target = portions(timeline.elapsed(), duration, leds.len());
        if target < self.painted {
            // Timeline repeated
            self.painted = 0;
        }

        for led in &mut leds[self.painted..target] {
            *led = self.color;
        }
        self.painted = target;
    }

    fn reset(&mut self) {
        self.painted = 0;
    }
}
