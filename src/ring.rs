use embassy_time::{Duration, Instant};

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::OutputDriver;
use crate::color::{OFF, Rgb, fill, scale_color};
use crate::frame_scheduler::{DEFAULT_MAX_CATCH_UP, DEFAULT_TICK_PERIOD, FrameClock};
use crate::poller::{DEFAULT_POLL_INTERVAL, PlayerClient, StatePoller};
use crate::scene::{Scene, SceneBank};
use crate::scheduler::AnimationScheduler;
use crate::selector::{AnimationSelector, DEFAULT_VOLUME_DISPLAY, Selection, Signals};
use crate::signals::{ControlFlags, InputSignals};

/// Configuration for the status ring
#[derive(Debug, Clone, Copy)]
pub struct StatusRingConfig {
    /// Number of LEDs on the ring, capped at the frame capacity
    pub pixel_count: usize,
    /// Length of one animation tick
    pub tick_period: Duration,
    /// Minimum time between two player probes
    pub poll_interval: Duration,
    /// Time the volume meter stays up after a change
    pub volume_display: Duration,
    /// Ticks that may be caught up after a stall
    pub max_catch_up_ticks: u32,
    /// Output brightness (0-255 = 0.0-1.0)
    pub brightness: u8,
}

impl StatusRingConfig {
    /// Defaults for a ring of `pixel_count` LEDs
    pub const fn new(pixel_count: usize) -> Self {
        Self {
            pixel_count,
            tick_period: DEFAULT_TICK_PERIOD,
            poll_interval: DEFAULT_POLL_INTERVAL,
            volume_display: DEFAULT_VOLUME_DISPLAY,
            max_catch_up_ticks: DEFAULT_MAX_CATCH_UP,
            brightness: 255,
        }
    }
}

/// Why the loop stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// Kill request, the ring was blanked immediately
    Killed,
    /// The shutdown animation finished
    ShutDown,
}

/// Result of advancing the loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopStatus {
    /// Call again after sleeping for `sleep`
    Running { sleep: Duration },
    /// The loop is over
    Stopped(StopReason),
}

/// Status ring - the main loop driver
///
/// Each tick polls the player, selects a scene, lets the scheduler arbitrate
/// and tick the active animation, and writes the frame to the output.
pub struct StatusRing<'a, O: OutputDriver, C: PlayerClient, const MAX_LEDS: usize> {
    // External dependencies and configuration
    output: O,
    poller: StatePoller<C>,
    inputs: &'a InputSignals,
    control: &'a ControlFlags,
    pixel_count: usize,
    brightness: u8,

    // Internal state
    clock: FrameClock,
    /// Engine time, advanced by one tick period per tick
    now: Instant,
    frame: [Rgb; MAX_LEDS],
    output_frame: [Rgb; MAX_LEDS],
    stopped: Option<StopReason>,

    // Internal dependencies
    selector: AnimationSelector,
    scheduler: AnimationScheduler<MAX_LEDS>,
}

impl<'a, O: OutputDriver, C: PlayerClient, const MAX_LEDS: usize> StatusRing<'a, O, C, MAX_LEDS> {
    /// Create the ring and blank the LEDs
    pub fn new(
        output: O,
        client: C,
        inputs: &'a InputSignals,
        control: &'a ControlFlags,
        bank: SceneBank<MAX_LEDS>,
        config: &StatusRingConfig,
    ) -> Self {
        let mut ring = Self {
            output,
            poller: StatePoller::new(client, config.poll_interval),
            inputs,
            control,
            pixel_count: config.pixel_count.min(MAX_LEDS),
            brightness: config.brightness,
            clock: FrameClock::new(config.tick_period, config.max_catch_up_ticks),
            now: Instant::from_ticks(0),
            frame: [OFF; MAX_LEDS],
            output_frame: [OFF; MAX_LEDS],
            stopped: None,
            selector: AnimationSelector::new(config.volume_display),
            scheduler: AnimationScheduler::new(bank),
        };
        ring.show();
        ring
    }

    /// Run every tick that is due at wall-clock time `now`
    ///
    /// Returns how long to sleep before calling again, or why the loop
    /// stopped. Once stopped, the ring stays stopped.
    pub fn advance(&mut self, now: Instant) -> LoopStatus {
        if let Some(reason) = self.stopped {
            return LoopStatus::Stopped(reason);
        }
        if self.control.kill_requested() {
            return LoopStatus::Stopped(self.stop_now());
        }

        self.clock.accumulate(now);
        while self.clock.take_tick() {
            if let Some(reason) = self.tick() {
                return LoopStatus::Stopped(reason);
            }
        }

        LoopStatus::Running {
            sleep: self.clock.sleep_duration(),
        }
    }

    /// Run one full tick: poll, select, schedule, render, show
    pub fn tick(&mut self) -> Option<StopReason> {
        if let Some(reason) = self.stopped {
            return Some(reason);
        }

        let signals = self.read_signals();
        let scene = match self.selector.select(&signals, self.now) {
            Selection::Kill => return Some(self.stop_now()),
            Selection::Play(scene) => scene,
        };

        if let Some(volume) = signals.volume {
            self.scheduler
                .bank_mut()
                .get_mut(Scene::VolumeMeter)
                .set_volume(volume);
        }

        let period = self.clock.tick_period();
        self.scheduler.request(scene);
        self.scheduler
            .tick(period, &mut self.frame[..self.pixel_count]);
        if self.scheduler.active() == Some(Scene::TrackChanged) {
            self.selector.acknowledge_track_change();
        }
        self.show();
        self.now += period;

        if signals.shutdown_requested && self.scheduler.is_finished(Scene::Shutdown) {
            #[cfg(feature = "esp32-log")]
            println!("[ring] shutdown animation finished");
            self.stopped = Some(StopReason::ShutDown);
        }
        self.stopped
    }

    /// Engine time of the next tick
    pub const fn now(&self) -> Instant {
        self.now
    }

    /// Unscaled frame of the last tick
    pub fn frame(&self) -> &[Rgb] {
        &self.frame[..self.pixel_count]
    }

    pub const fn scheduler(&self) -> &AnimationScheduler<MAX_LEDS> {
        &self.scheduler
    }

    pub const fn selector(&self) -> &AnimationSelector {
        &self.selector
    }

    pub const fn poller(&self) -> &StatePoller<C> {
        &self.poller
    }

    pub fn poller_mut(&mut self) -> &mut StatePoller<C> {
        &mut self.poller
    }

    pub const fn output(&self) -> &O {
        &self.output
    }

    pub fn set_brightness(&mut self, brightness: u8) {
        self.brightness = brightness;
    }

    /// Gather the player status, the inputs and the control flags
    fn read_signals(&mut self) -> Signals {
        let inputs = self.inputs.snapshot();
        if let Some(volume) = inputs.reported_volume {
            self.poller.note_volume(volume);
        }
        let status = self.poller.poll(self.now);

        Signals {
            connected: status.connected,
            playing: status.playing,
            track: status.track,
            volume: status.volume,
            button_pressed: inputs.button_pressed,
            shutdown_requested: self.control.shutdown_requested(),
            kill_requested: self.control.kill_requested(),
        }
    }

    /// Blank the ring without animation
    fn stop_now(&mut self) -> StopReason {
        #[cfg(feature = "esp32-log")]
        println!("[ring] killed");
        fill(&mut self.frame, OFF);
        self.show();
        self.stopped = Some(StopReason::Killed);
        StopReason::Killed
    }

    /// Scale the frame to the output brightness and write it
    fn show(&mut self) {
        let count = self.pixel_count;
        for (out, pixel) in self.output_frame[..count]
            .iter_mut()
            .zip(&self.frame[..count])
        {
            *out = scale_color(*pixel, self.brightness);
        }
        self.output.write(&self.output_frame[..count]);
    }
}
