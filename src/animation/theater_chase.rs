//! Theater marquee chase
//!
//! Every third LED is lit, and the lit set moves by one position each step.
//! A full pass over the three phases is one iteration.

use embassy_time::Duration;

use super::{Animation, Timeline};
use crate::color::{OFF, Rgb, wheel};

const PHASES: u8 = 3;
/// Iterations of the rainbow variant before the hue offset wraps
const RAINBOW_ITERATIONS: u16 = 255;

/// Colors of the lit LEDs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChasePalette {
    /// Every lit LED uses the same color
    Solid(Rgb),
    /// Color wheel position from the LED index and the iteration counter
    Rainbow,
}

#[derive(Debug, Clone)]
pub struct TheaterChaseAnimation {
    palette: ChasePalette,
    /// Time between two phases
    step: Duration,
    iterations: u16,

    /// Current phase (`q`)
    phase: u8,
    /// Completed iterations (`j`), wraps at `iterations`
    iteration: u16,
    step_timer: Duration,
    started: bool,
}

impl TheaterChaseAnimation {
    /// Single-color chase
    pub const fn new(color: Rgb, step: Duration, iterations: u16) -> Self {
        Self::with_palette(ChasePalette::Solid(color), step, iterations)
    }

    /// Rainbow chase. The hue offset advances once per iteration.
    pub const fn rainbow(step: Duration) -> Self {
        Self::with_palette(ChasePalette::Rainbow, step, RAINBOW_ITERATIONS)
    }

    const fn with_palette(palette: ChasePalette, step: Duration, iterations: u16) -> Self {
        Self {
            palette,
            step,
            iterations: if iterations == 0 { 1 } else { iterations },
            phase: 0,
            iteration: 0,
            step_timer: Duration::from_ticks(0),
            started: false,
        }
    }

    /// Time needed to play every iteration once
    pub const fn run_duration(&self) -> Duration {
        Duration::from_ticks(self.step.as_ticks() * PHASES as u64 * self.iterations as u64)
    }

    pub const fn palette(&self) -> ChasePalette {
        self.palette
    }

    pub const fn phase(&self) -> u8 {
        self.phase
    }

    pub const fn iteration(&self) -> u16 {
        self.iteration
    }

    fn color_at(&self, index: usize) -> Rgb {
        match self.palette {
            ChasePalette::Solid(color) => color,
            #[allow(clippy::cast_possible_truncation)]
            ChasePalette::Rainbow => wheel(((index + usize::from(self.iteration)) % 255) as u8),
        }
    }

    /// Paint the LEDs of the current phase
    fn light(&self, leds: &mut [Rgb]) {
        let len = leds.len();
        for base in (0..len).step_by(usize::from(PHASES)) {
            if let Some(led) = leds.get_mut(base + usize::from(self.phase)) {
                *led = self.color_at(base);
            }
        }
    }

    /// Switch off the LEDs of the current phase
    fn clear(&self, leds: &mut [Rgb]) {
        let len = leds.len();
        for base in (0..len).step_by(usize::from(PHASES)) {
            if let Some(led) = leds.get_mut(base + usize::from(self.phase)) {
                *led = OFF;
            }
        }
    }

    fn next_phase(&mut self) {
        self.phase += 1;
        if self.phase < PHASES {
            return;
        }
        self.phase = 0;
        self.iteration += 1;
        if self.iteration >= self.iterations {
            self.iteration = 0;
        }
    }
}

impl Animation for TheaterChaseAnimation {
    fn render(&mut self, _timeline: &Timeline, dt: Duration, leds: &mut [Rgb]) {
        if !self.started {
            self.started = true;
            self.light(leds);
            return;
        }

        self.step_timer += dt;
        while self.step_timer >= self.step {
            self.step_timer -= self.step;
            self.clear(leds);
            self.next_phase();
            self.light(leds);
            if self.step.as_ticks() == 0 {
                break;
            }
        }
    }

    fn reset(&mut self) {
        self.phase = 0;
        self.iteration = 0;
        self.step_timer = Duration::from_ticks(0);
        self.started = false;
    }
}
