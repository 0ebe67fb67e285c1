//! Solid fill fading between two colors

use embassy_time::Duration;

use super::{Animation, Timeline};
use crate::color::{Rgb, blend_colors, fill};

/// Fills every LED with the interpolation of `from` and `to` at the
/// timeline progress.
#[derive(Debug, Clone)]
pub struct FadeAnimation {
    from: Rgb,
    to: Rgb,
}

impl FadeAnimation {
    pub const fn new(from: Rgb, to: Rgb) -> Self {
        Self { from, to }
    }
}

impl Animation for FadeAnimation {
    fn render(&mut self, timeline: &Timeline, _dt: Duration, leds: &mut [Rgb]) {
        fill(leds, blend_colors(self.from, self.to, timeline.alpha()));
    }
}
