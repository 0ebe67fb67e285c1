//! Fire flicker
//!
//! Keeps a target frame of glowing orange LEDs with a few dim embers and
//! reveals it one LED at a time. Each time the reveal cursor wraps around,
//! a fresh target frame is generated, but never sooner than a randomized
//! interval after the previous one.

use embassy_time::Duration;
use heapless::Vec;

use super::{Animation, Timeline};
use crate::color::Rgb;

const DEFAULT_REVEAL_STEP: Duration = Duration::from_millis(100);
const DEFAULT_REGEN_MIN: Duration = Duration::from_millis(150);
const DEFAULT_REGEN_MAX: Duration = Duration::from_millis(200);

/// Flicker animation over at most `N` LEDs
#[derive(Debug, Clone)]
pub struct FireAnimation<const N: usize> {
    /// Time between two revealed LEDs
    reveal_step: Duration,
    /// Bounds of the randomized regeneration interval
    regen_min: Duration,
    regen_max: Duration,
    rng: fastrand::Rng,

    target: Vec<Rgb, N>,
    /// Next LED to reveal
    cursor: usize,
    reveal_timer: Duration,
    /// Time since the target frame was generated
    since_regen: Duration,
    regen_interval: Duration,
    /// The cursor wrapped; regenerate before revealing again
    wrapped: bool,
    /// Target frames generated since the last reset
    generations: u32,
}

impl<const N: usize> FireAnimation<N> {
    pub fn new(seed: u64) -> Self {
        Self {
            reveal_step: DEFAULT_REVEAL_STEP,
            regen_min: DEFAULT_REGEN_MIN,
            regen_max: DEFAULT_REGEN_MAX,
            rng: fastrand::Rng::with_seed(seed),
            target: Vec::new(),
            cursor: 0,
            reveal_timer: Duration::from_ticks(0),
            since_regen: Duration::from_ticks(0),
            regen_interval: DEFAULT_REGEN_MIN,
            wrapped: false,
            generations: 0,
        }
    }

    /// Set the time between two revealed LEDs
    #[must_use]
    pub fn with_reveal_step(mut self, step: Duration) -> Self {
        self.reveal_step = step;
        self
    }

    /// Set the bounds of the regeneration interval
    #[must_use]
    pub fn with_regen_interval(mut self, min: Duration, max: Duration) -> Self {
        if min <= max {
            self.regen_min = min;
            self.regen_max = max;
        } else {
            self.regen_min = max;
            self.regen_max = min;
        }
        self
    }

    /// Target frame currently being revealed
    pub fn target(&self) -> &[Rgb] {
        &self.target
    }

    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    pub const fn regen_interval(&self) -> Duration {
        self.regen_interval
    }

    pub const fn generations(&self) -> u32 {
        self.generations
    }

    fn regenerate(&mut self, count: usize) {
        let count = count.min(N);
        let rng = &mut self.rng;
        self.target.clear();
        self.target.extend((0..count).map(|_| Rgb {
            r: rng.u8(240..=255),
            g: rng.u8(30..=60),
            b: 0,
        }));

        // Dim a random subset, duplicates allowed
        for _ in 0..count {
            let index = self.rng.usize(..count);
            let dim = Rgb {
                r: self.rng.u8(50..=60),
                g: self.rng.u8(5..=10),
                b: 0,
            };
            self.target[index] = dim;
        }

        self.regen_interval = Duration::from_ticks(
            self.rng
                .u64(self.regen_min.as_ticks()..=self.regen_max.as_ticks()),
        );
        self.since_regen = Duration::from_ticks(0);
        self.wrapped = false;
        self.generations += 1;
    }

    fn reveal(&mut self, leds: &mut [Rgb]) {
        leds[self.cursor] = self.target[self.cursor];
        self.cursor += 1;
        if self.cursor >= leds.len() {
            self.cursor = 0;
            self.wrapped = true;
        }
    }
}

impl<const N: usize> Animation for FireAnimation<N> {
    fn render(&mut self, _timeline: &Timeline, dt: Duration, leds: &mut [Rgb]) {
        let count = leds.len().min(N);
        let leds = &mut leds[..count];
        if count == 0 {
            return;
        }

        self.since_regen += dt;
        if self.target.len() != count {
            self.cursor = 0;
            self.regenerate(count);
            self.reveal(leds);
            return;
        }

        self.reveal_timer += dt;
        while self.reveal_timer >= self.reveal_step {
            if self.wrapped {
                if self.since_regen < self.regen_interval {
                    // Hold the finished frame until the interval elapses
                    self.reveal_timer = self.reveal_step;
                    break;
                }
                self.regenerate(count);
            }

            self.reveal_timer -= self.reveal_step;
            self.reveal(leds);
            if self.reveal_step.as_ticks() == 0 {
                break;
            }
        }
    }

    fn reset(&mut self) {
        self.target.clear();
        self.cursor = 0;
        self.reveal_timer = Duration::from_ticks(0);
        self.since_regen = Duration::from_ticks(0);
        self.wrapped = false;
        self.generations = 0;
    }
}
