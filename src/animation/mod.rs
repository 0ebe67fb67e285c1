//! Animation system with compile-time known variants
//!
//! All animations are stored in an enum to avoid heap allocations and
//! dynamic dispatch. Every slot pairs a variant with a shared [`Timeline`]
//! that tracks elapsed time, duration and repeat behavior.

mod color_wipe;
mod fade;
mod fire;
mod rainbow;
mod theater_chase;
mod timeline;
mod volume_meter;

use embassy_time::Duration;
pub use color_wipe::ColorWipeAnimation;
pub use fade::FadeAnimation;
pub use fire::FireAnimation;
pub use rainbow::{RainbowAnimation, RainbowCycleAnimation};
pub use theater_chase::{ChasePalette, TheaterChaseAnimation};
pub use timeline::{Repeat, Timeline};
pub use volume_meter::VolumeMeterAnimation;

use crate::color::Rgb;

const ANIMATION_NAME_FADE: &str = "fade";
const ANIMATION_NAME_COLOR_WIPE: &str = "color_wipe";
const ANIMATION_NAME_THEATER_CHASE: &str = "theater_chase";
const ANIMATION_NAME_THEATER_CHASE_RAINBOW: &str = "theater_chase_rainbow";
const ANIMATION_NAME_RAINBOW: &str = "rainbow";
const ANIMATION_NAME_RAINBOW_CYCLE: &str = "rainbow_cycle";
const ANIMATION_NAME_FIRE: &str = "fire";
const ANIMATION_NAME_VOLUME_METER: &str = "volume_meter";

pub trait Animation {
    /// Render a single tick into the frame
    ///
    /// `timeline` has already been advanced by `dt`. Pixels the animation
    /// does not touch keep their previous value.
    fn render(&mut self, timeline: &Timeline, dt: Duration, leds: &mut [Rgb]);

    /// Reset animation-local state
    fn reset(&mut self) {}
}

/// Animation variants
#[derive(Debug, Clone)]
pub enum AnimationKind<const N: usize> {
    /// Solid fill between two colors
    Fade(FadeAnimation),
    /// One LED after another in a single color
    ColorWipe(ColorWipeAnimation),
    /// Marquee chase in a single color
    TheaterChase(TheaterChaseAnimation),
    /// Marquee chase over the color wheel
    TheaterChaseRainbow(TheaterChaseAnimation),
    /// Whole ring shifting over the color wheel
    Rainbow(RainbowAnimation),
    /// Color wheel spread over the ring
    RainbowCycle(RainbowCycleAnimation),
    /// Flickering embers
    Fire(FireAnimation<N>),
    /// Arc proportional to the volume
    VolumeMeter(VolumeMeterAnimation),
}

/// Animation slot - a variant plus its timing record
#[derive(Debug, Clone)]
pub struct AnimationSlot<const N: usize> {
    timeline: Timeline,
    kind: AnimationKind<N>,
}

impl<const N: usize> AnimationSlot<N> {
    pub const fn new(kind: AnimationKind<N>, timeline: Timeline) -> Self {
        Self { timeline, kind }
    }

    /// Name of the animation variant
    pub const fn name(&self) -> &'static str {
        match &self.kind {
            AnimationKind::Fade(_) => ANIMATION_NAME_FADE,
            AnimationKind::ColorWipe(_) => ANIMATION_NAME_COLOR_WIPE,
            AnimationKind::TheaterChase(_) => ANIMATION_NAME_THEATER_CHASE,
            AnimationKind::TheaterChaseRainbow(_) => ANIMATION_NAME_THEATER_CHASE_RAINBOW,
            AnimationKind::Rainbow(_) => ANIMATION_NAME_RAINBOW,
            AnimationKind::RainbowCycle(_) => ANIMATION_NAME_RAINBOW_CYCLE,
            AnimationKind::Fire(_) => ANIMATION_NAME_FIRE,
            AnimationKind::VolumeMeter(_) => ANIMATION_NAME_VOLUME_METER,
        }
    }

    pub const fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    pub const fn kind(&self) -> &AnimationKind<N> {
        &self.kind
    }

    pub fn kind_mut(&mut self) -> &mut AnimationKind<N> {
        &mut self.kind
    }

    pub fn is_finished(&self) -> bool {
        self.timeline.is_finished()
    }

    pub const fn waits_for_finish(&self) -> bool {
        self.timeline.waits_for_finish()
    }

    /// Advance the timeline and render one tick
    ///
    /// An empty frame only advances the timeline.
    pub fn tick(&mut self, dt: Duration, leds: &mut [Rgb]) {
        self.timeline.advance(dt);
        if leds.is_empty() {
            return;
        }

        let timeline = &self.timeline;
        match &mut self.kind {
            AnimationKind::Fade(animation) => animation.render(timeline, dt, leds),
            AnimationKind::ColorWipe(animation) => animation.render(timeline, dt, leds),
            AnimationKind::TheaterChase(animation)
            | AnimationKind::TheaterChaseRainbow(animation) => {
                animation.render(timeline, dt, leds);
            }
            AnimationKind::Rainbow(animation) => animation.render(timeline, dt, leds),
            AnimationKind::RainbowCycle(animation) => animation.render(timeline, dt, leds),
            AnimationKind::Fire(animation) => animation.render(timeline, dt, leds),
            AnimationKind::VolumeMeter(animation) => animation.render(timeline, dt, leds),
        }
    }

    /// Reset the timeline and the animation state
    pub fn reset(&mut self) {
        self.timeline.reset();
        match &mut self.kind {
            AnimationKind::Fade(animation) => Animation::reset(animation),
            AnimationKind::ColorWipe(animation) => Animation::reset(animation),
            AnimationKind::TheaterChase(animation)
            | AnimationKind::TheaterChaseRainbow(animation) => Animation::reset(animation),
            AnimationKind::Rainbow(animation) => Animation::reset(animation),
            AnimationKind::RainbowCycle(animation) => Animation::reset(animation),
            AnimationKind::Fire(animation) => Animation::reset(animation),
            AnimationKind::VolumeMeter(animation) => Animation::reset(animation),
        }
    }

    /// Update the volume shown by a volume meter. Other variants ignore it.
    pub fn set_volume(&mut self, volume: u8) {
        if let AnimationKind::VolumeMeter(animation) = &mut self.kind {
            animation.set_volume(volume);
        }
    }
}
