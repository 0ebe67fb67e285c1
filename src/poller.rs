//! Rate-limited player state cache
//!
//! The player is probed at most once per poll interval. Between probes the
//! last known status is served, so the tick loop never waits on the player
//! more often than the interval allows.

use core::fmt;

use embassy_time::{Duration, Instant};

#[cfg(feature = "esp32-log")]
use esp_println::println;

/// Default interval between two probes (2 Hz)
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(500);

const MAX_VOLUME: u8 = 100;

/// Error returned by a player client
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerError {
    /// The player could not be reached
    Disconnected,
    /// The player did not answer in time
    Timeout,
    /// The status response lacked a field
    MissingField(&'static str),
}

impl fmt::Display for PlayerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Disconnected => write!(f, "player disconnected"),
            Self::Timeout => write!(f, "player timed out"),
            Self::MissingField(field) => write!(f, "missing field: {}", field),
        }
    }
}

/// Opaque identity of the current track
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TrackId(pub u32);

/// Player queries used by the ring
///
/// Implement this trait on top of the player protocol client. Every call
/// may block on I/O; the poller limits how often they happen.
pub trait PlayerClient {
    /// Check that the player is reachable
    fn probe_connection(&mut self) -> Result<(), PlayerError>;

    /// Identity of the current track
    fn current_track(&mut self) -> Result<TrackId, PlayerError>;

    /// Check if the player is playing
    fn is_playing(&mut self) -> Result<bool, PlayerError>;

    /// Current volume in percent (0-100)
    fn current_volume(&mut self) -> Result<u8, PlayerError>;
}

/// Last known player state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PlayerStatus {
    pub connected: bool,
    pub playing: bool,
    /// Last track reported while connected
    pub track: Option<TrackId>,
    /// Last volume reported while connected
    pub volume: Option<u8>,
}

/// Rate-limited cache in front of a [`PlayerClient`]
pub struct StatePoller<C: PlayerClient> {
    client: C,
    interval: Duration,
    last_probed_at: Option<Instant>,
    status: PlayerStatus,
}

impl<C: PlayerClient> StatePoller<C> {
    pub const fn new(client: C, interval: Duration) -> Self {
        Self {
            client,
            interval,
            last_probed_at: None,
            status: PlayerStatus {
                connected: false,
                playing: false,
                track: None,
                volume: None,
            },
        }
    }

    /// Return the player status, probing the player if the interval elapsed
    pub fn poll(&mut self, now: Instant) -> PlayerStatus {
        if self.is_due(now) {
            self.refresh(now);
        }
        self.status
    }

    /// Cached status without probing
    pub const fn status(&self) -> PlayerStatus {
        self.status
    }

    pub const fn last_probed_at(&self) -> Option<Instant> {
        self.last_probed_at
    }

    /// Record a volume the player was just set to
    ///
    /// Serves it until the next probe reads the player again.
    pub fn note_volume(&mut self, volume: u8) {
        self.status.volume = Some(volume.min(MAX_VOLUME));
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    pub fn client_mut(&mut self) -> &mut C {
        &mut self.client
    }

    fn is_due(&self, now: Instant) -> bool {
        match self.last_probed_at {
            None => true,
            Some(last) => now.saturating_duration_since(last) >= self.interval,
        }
    }

    /// Probe the player and refresh every field it answers for
    fn refresh(&mut self, now: Instant) {
        self.last_probed_at = Some(now);

        if let Err(_error) = self.client.probe_connection() {
            #[cfg(feature = "esp32-log")]
            if self.status.connected {
                println!("[poller] connection lost: {}", _error);
            }
            self.status.connected = false;
            self.status.playing = false;
            return;
        }

        #[cfg(feature = "esp32-log")]
        if !self.status.connected {
            println!("[poller] connected");
        }
        self.status.connected = true;

        // Unanswered fields keep their previous value
        match self.client.is_playing() {
            Ok(playing) => self.status.playing = playing,
            Err(_error) => {
                #[cfg(feature = "esp32-log")]
                println!("[poller] play state unavailable: {}", _error);
            }
        }
        match self.client.current_track() {
            Ok(track) => self.status.track = Some(track),
            Err(_error) => {
                #[cfg(feature = "esp32-log")]
                println!("[poller] track unavailable: {}", _error);
            }
        }
        match self.client.current_volume() {
            Ok(volume) => self.status.volume = Some(volume.min(MAX_VOLUME)),
            Err(_error) => {
                #[cfg(feature = "esp32-log")]
                println!("[poller] volume unavailable: {}", _error);
            }
        }
    }
}
