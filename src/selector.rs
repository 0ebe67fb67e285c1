//! Scene selection
//!
//! Maps the external state of one tick onto the scene that should be
//! active. Rules are checked in priority order and the first match wins:
//!
//! 1. kill request - blank immediately and stop
//! 2. shutdown request
//! 3. not connected yet - waiting
//! 4. connected for the first time - connected chime
//! 5. volume changed recently - volume meter
//! 6. button pressed - awaiting scan
//! 7. not playing - input error
//! 8. track changed - track chime
//! 9. now playing

use embassy_time::{Duration, Instant};

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::poller::TrackId;
use crate::scene::Scene;

/// Default time the volume meter stays up after a change
pub const DEFAULT_VOLUME_DISPLAY: Duration = Duration::from_secs(3);

/// External state observed at the start of a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Signals {
    pub connected: bool,
    pub playing: bool,
    /// Current track, only meaningful while connected
    pub track: Option<TrackId>,
    /// Current volume, only meaningful while connected
    pub volume: Option<u8>,
    pub button_pressed: bool,
    pub shutdown_requested: bool,
    pub kill_requested: bool,
}

/// Outcome of a selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// Blank the ring and stop right away
    Kill,
    /// Request this scene from the scheduler
    Play(Scene),
}

/// Decides which scene should be active
///
/// Keeps the edge-detection memory between ticks: whether the current
/// connection has been acknowledged, the last seen track and volume, the
/// end of the volume display window and a track change not yet shown.
#[derive(Debug, Clone)]
pub struct AnimationSelector {
    volume_display: Duration,
    had_connection: bool,
    last_track: Option<TrackId>,
    last_volume: Option<u8>,
    volume_until: Option<Instant>,
    /// Track changed and the chime has not become active yet
    track_change_pending: bool,
}

impl Default for AnimationSelector {
    fn default() -> Self {
        Self::new(DEFAULT_VOLUME_DISPLAY)
    }
}

impl AnimationSelector {
    pub const fn new(volume_display: Duration) -> Self {
        Self {
            volume_display,
            had_connection: false,
            last_track: None,
            last_volume: None,
            volume_until: None,
            track_change_pending: false,
        }
    }

    /// The current connection has been acknowledged with the chime
    pub const fn had_connection(&self) -> bool {
        self.had_connection
    }

    /// The volume meter window is open at `now`
    pub fn is_showing_volume(&self, now: Instant) -> bool {
        self.volume_until.is_some_and(|until| now < until)
    }

    /// A track change is waiting for its chime
    pub const fn track_change_pending(&self) -> bool {
        self.track_change_pending
    }

    /// Mark the pending track change as shown
    ///
    /// Call once the track chime has become active. Until then every
    /// selection that reaches the track rule keeps asking for it.
    pub fn acknowledge_track_change(&mut self) {
        self.track_change_pending = false;
    }

    /// Pick the scene for this tick
    pub fn select(&mut self, signals: &Signals, now: Instant) -> Selection {
        if signals.kill_requested {
            return Selection::Kill;
        }

        if self.observe_track(signals) {
            self.track_change_pending = true;
        }
        if self.observe_volume(signals) {
            self.volume_until = Some(now + self.volume_display);
        }
        if !signals.connected && self.had_connection {
            #[cfg(feature = "esp32-log")]
            println!("[selector] connection lost");
            self.had_connection = false;
            self.track_change_pending = false;
        }

        if signals.shutdown_requested {
            return Selection::Play(Scene::Shutdown);
        }

        if !self.had_connection {
            if !signals.connected {
                return Selection::Play(Scene::Waiting);
            }
            #[cfg(feature = "esp32-log")]
            println!("[selector] connection acknowledged");
            self.had_connection = true;
            return Selection::Play(Scene::Connected);
        }

        if self.is_showing_volume(now) {
            return Selection::Play(Scene::VolumeMeter);
        }
        if signals.button_pressed {
            return Selection::Play(Scene::AwaitingScan);
        }
        if !signals.playing {
            return Selection::Play(Scene::InputError);
        }
        if self.track_change_pending {
            return Selection::Play(Scene::TrackChanged);
        }
        Selection::Play(Scene::NowPlaying)
    }

    /// Returns true if the track differs from the last one seen while connected
    ///
    /// The first track ever seen is not a change. The cache survives
    /// disconnects, so a reconnect only fires if the track really differs.
    fn observe_track(&mut self, signals: &Signals) -> bool {
        if !signals.connected {
            return false;
        }
        let Some(track) = signals.track else {
            return false;
        };
        let previous = self.last_track.replace(track);
        previous.is_some_and(|previous| previous != track)
    }

    /// Returns true if the volume differs from the last one seen while connected
    fn observe_volume(&mut self, signals: &Signals) -> bool {
        if !signals.connected {
            return false;
        }
        let Some(volume) = signals.volume else {
            return false;
        };
        let previous = self.last_volume.replace(volume);
        previous.is_some_and(|previous| previous != volume)
    }
}
