//! Volume arc
//!
//! Lights an arc proportional to the current volume, starting opposite to
//! LED 0 and running clockwise. The arc color moves from green to red as
//! the volume rises.

use embassy_time::Duration;

use super::{Animation, Timeline};
use crate::{
    color::{Hsv, OFF, Rgb, hsv2rgb},
    math8::percent_of,
};

const MAX_VOLUME: u8 = 100;
const HUE_GREEN: u8 = 85;
const HUE_RED: u8 = 0;

#[derive(Debug, Clone)]
pub struct VolumeMeterAnimation {
    /// Volume in percent (0-100)
    volume: u8,
}

impl Default for VolumeMeterAnimation {
    fn default() -> Self {
        Self::new()
    }
}

impl VolumeMeterAnimation {
    pub const fn new() -> Self {
        Self { volume: 0 }
    }

    pub const fn volume(&self) -> u8 {
        self.volume
    }

    /// Update the displayed volume, clamped to 100
    pub fn set_volume(&mut self, volume: u8) {
        self.volume = volume.min(MAX_VOLUME);
    }

    /// Color of the lit arc at the given volume
    #[allow(clippy::cast_possible_truncation)]
    pub fn level_color(volume: u8) -> Rgb {
        let volume = u16::from(volume.min(MAX_VOLUME));
        let span = u16::from(HUE_GREEN - HUE_RED);
        let hue = HUE_GREEN - (span * volume / u16::from(MAX_VOLUME)) as u8;
        hsv2rgb(Hsv {
            hue,
            sat: 255,
            val: 255,
        })
    }

    /// Number of LEDs lit at the given volume out of `count`
    pub const fn lit_count(volume: u8, count: usize) -> usize {
        percent_of(volume, count)
    }
}

impl Animation for VolumeMeterAnimation {
    fn render(&mut self, _timeline: &Timeline, _dt: Duration, leds: &mut [Rgb]) {
        let count = leds.len();
        let lit = Self::lit_count(self.volume, count);
        let color = Self::level_color(self.volume);
        let offset = count / 2;

        for step in 0..count {
            leds[(offset + step) % count] = if step < lit { color } else { OFF };
        }
    }
}
