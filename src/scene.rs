//! Scenes - the roles an animation can play on the ring
//!
//! The selector decides on a [`Scene`]; the [`SceneBank`] maps each scene to
//! a pre-built animation that lives for the whole run.

use embassy_time::Duration;

use crate::animation::{
    AnimationKind, AnimationSlot, ColorWipeAnimation, FireAnimation, RainbowCycleAnimation,
    TheaterChaseAnimation, Timeline, VolumeMeterAnimation,
};
use crate::color::{OFF, Rgb, rgb_from_u32};

const SCENE_NAME_WAITING: &str = "waiting";
const SCENE_NAME_CONNECTED: &str = "connected";
const SCENE_NAME_SHUTDOWN: &str = "shutdown";
const SCENE_NAME_VOLUME: &str = "volume";
const SCENE_NAME_AWAITING_SCAN: &str = "awaiting_scan";
const SCENE_NAME_INPUT_ERROR: &str = "input_error";
const SCENE_NAME_TRACK_CHANGED: &str = "track_changed";
const SCENE_NAME_NOW_PLAYING: &str = "now_playing";

const SCENE_ID_WAITING: u8 = 0;
const SCENE_ID_CONNECTED: u8 = 1;
const SCENE_ID_SHUTDOWN: u8 = 2;
const SCENE_ID_VOLUME: u8 = 3;
const SCENE_ID_AWAITING_SCAN: u8 = 4;
const SCENE_ID_INPUT_ERROR: u8 = 5;
const SCENE_ID_TRACK_CHANGED: u8 = 6;
const SCENE_ID_NOW_PLAYING: u8 = 7;

/// Number of scenes
pub const SCENE_COUNT: usize = 8;

const CONNECTED_COLOR: Rgb = rgb_from_u32(0x00_00_7F);
const INPUT_ERROR_COLOR: Rgb = rgb_from_u32(0x7F_00_00);
const TRACK_CHANGED_COLOR: Rgb = rgb_from_u32(0x00_7F_00);

const WAITING_STEP: Duration = Duration::from_millis(50);
const CONNECTED_STEP: Duration = Duration::from_millis(50);
const CONNECTED_ITERATIONS: u16 = 10;
const INPUT_ERROR_STEP: Duration = Duration::from_millis(100);
const INPUT_ERROR_ITERATIONS: u16 = 3;
const SHUTDOWN_DURATION: Duration = Duration::from_millis(600);
const TRACK_CHANGED_DURATION: Duration = Duration::from_millis(500);
/// One full wheel turn every 1.28 seconds
const NOW_PLAYING_SPEED: f32 = 200.0;

/// Known scenes, in no particular priority
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum Scene {
    /// Player not reachable yet
    Waiting = SCENE_ID_WAITING,
    /// Player just became reachable
    Connected = SCENE_ID_CONNECTED,
    /// Graceful shutdown requested
    Shutdown = SCENE_ID_SHUTDOWN,
    /// Volume feedback
    VolumeMeter = SCENE_ID_VOLUME,
    /// Button held, waiting for a card
    AwaitingScan = SCENE_ID_AWAITING_SCAN,
    /// Player reachable but not playing
    InputError = SCENE_ID_INPUT_ERROR,
    /// A new track started
    TrackChanged = SCENE_ID_TRACK_CHANGED,
    /// Regular playback
    NowPlaying = SCENE_ID_NOW_PLAYING,
}

impl Scene {
    pub const ALL: [Scene; SCENE_COUNT] = [
        Self::Waiting,
        Self::Connected,
        Self::Shutdown,
        Self::VolumeMeter,
        Self::AwaitingScan,
        Self::InputError,
        Self::TrackChanged,
        Self::NowPlaying,
    ];

    pub fn from_raw(value: u8) -> Option<Self> {
        Some(match value {
            SCENE_ID_WAITING => Self::Waiting,
            SCENE_ID_CONNECTED => Self::Connected,
            SCENE_ID_SHUTDOWN => Self::Shutdown,
            SCENE_ID_VOLUME => Self::VolumeMeter,
            SCENE_ID_AWAITING_SCAN => Self::AwaitingScan,
            SCENE_ID_INPUT_ERROR => Self::InputError,
            SCENE_ID_TRACK_CHANGED => Self::TrackChanged,
            SCENE_ID_NOW_PLAYING => Self::NowPlaying,
            _ => return None,
        })
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Waiting => SCENE_NAME_WAITING,
            Self::Connected => SCENE_NAME_CONNECTED,
            Self::Shutdown => SCENE_NAME_SHUTDOWN,
            Self::VolumeMeter => SCENE_NAME_VOLUME,
            Self::AwaitingScan => SCENE_NAME_AWAITING_SCAN,
            Self::InputError => SCENE_NAME_INPUT_ERROR,
            Self::TrackChanged => SCENE_NAME_TRACK_CHANGED,
            Self::NowPlaying => SCENE_NAME_NOW_PLAYING,
        }
    }

    pub fn parse_from_str(s: &str) -> Option<Self> {
        match s {
            SCENE_NAME_WAITING => Some(Self::Waiting),
            SCENE_NAME_CONNECTED => Some(Self::Connected),
            SCENE_NAME_SHUTDOWN => Some(Self::Shutdown),
            SCENE_NAME_VOLUME => Some(Self::VolumeMeter),
            SCENE_NAME_AWAITING_SCAN => Some(Self::AwaitingScan),
            SCENE_NAME_INPUT_ERROR => Some(Self::InputError),
            SCENE_NAME_TRACK_CHANGED => Some(Self::TrackChanged),
            SCENE_NAME_NOW_PLAYING => Some(Self::NowPlaying),
            _ => None,
        }
    }

    const fn index(self) -> usize {
        self as usize
    }
}

/// Pre-built animations, one per scene
#[derive(Debug, Clone)]
pub struct SceneBank<const N: usize> {
    slots: [AnimationSlot<N>; SCENE_COUNT],
}

impl<const N: usize> SceneBank<N> {
    /// Default animation set. `seed` feeds the fire flicker.
    pub fn with_defaults(seed: u64) -> Self {
        let connected = TheaterChaseAnimation::new(CONNECTED_COLOR, CONNECTED_STEP, CONNECTED_ITERATIONS);
        let connected_duration = connected.run_duration();
        let input_error =
            TheaterChaseAnimation::new(INPUT_ERROR_COLOR, INPUT_ERROR_STEP, INPUT_ERROR_ITERATIONS);
        let input_error_duration = input_error.run_duration();

        Self {
            slots: [
                AnimationSlot::new(
                    AnimationKind::TheaterChaseRainbow(TheaterChaseAnimation::rainbow(WAITING_STEP)),
                    Timeline::unbounded(),
                ),
                AnimationSlot::new(
                    AnimationKind::TheaterChase(connected),
                    Timeline::once(connected_duration).with_wait_for_finish(),
                ),
                AnimationSlot::new(
                    AnimationKind::ColorWipe(ColorWipeAnimation::new(OFF)),
                    Timeline::once(SHUTDOWN_DURATION).with_wait_for_finish(),
                ),
                AnimationSlot::new(
                    AnimationKind::VolumeMeter(VolumeMeterAnimation::new()),
                    Timeline::unbounded(),
                ),
                AnimationSlot::new(
                    AnimationKind::Fire(FireAnimation::new(seed)),
                    Timeline::unbounded(),
                ),
                AnimationSlot::new(
                    AnimationKind::TheaterChase(input_error),
                    Timeline::looping(input_error_duration),
                ),
                AnimationSlot::new(
                    AnimationKind::ColorWipe(ColorWipeAnimation::new(TRACK_CHANGED_COLOR)),
                    Timeline::once(TRACK_CHANGED_DURATION).with_wait_for_finish(),
                ),
                AnimationSlot::new(
                    AnimationKind::RainbowCycle(RainbowCycleAnimation::new(NOW_PLAYING_SPEED)),
                    Timeline::unbounded(),
                ),
            ],
        }
    }

    /// Replace the animation of a scene
    pub fn set(&mut self, scene: Scene, slot: AnimationSlot<N>) {
        self.slots[scene.index()] = slot;
    }

    #[must_use]
    pub fn with(mut self, scene: Scene, slot: AnimationSlot<N>) -> Self {
        self.set(scene, slot);
        self
    }

    pub fn get(&self, scene: Scene) -> &AnimationSlot<N> {
        &self.slots[scene.index()]
    }

    pub fn get_mut(&mut self, scene: Scene) -> &mut AnimationSlot<N> {
        &mut self.slots[scene.index()]
    }
}
