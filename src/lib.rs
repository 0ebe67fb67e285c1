#![no_std]

pub mod animation;
pub mod color;
pub mod encoder;
pub mod frame_scheduler;
pub mod math8;
pub mod poller;
pub mod ring;
pub mod scene;
pub mod scheduler;
pub mod selector;
pub mod signals;

pub use animation::{AnimationKind, AnimationSlot, Repeat, Timeline};
pub use encoder::{EncoderConfig, EncoderEvent, RotaryEncoder, VolumeControl};
pub use frame_scheduler::FrameClock;
pub use poller::{PlayerClient, PlayerError, PlayerStatus, StatePoller, TrackId};
pub use ring::{LoopStatus, StatusRing, StatusRingConfig, StopReason};
pub use scene::{Scene, SceneBank};
pub use scheduler::AnimationScheduler;
pub use selector::{AnimationSelector, Selection, Signals};
pub use signals::{ControlFlags, InputSignals, InputSnapshot};

pub use color::{Hsv, Rgb};
pub use embassy_time::{Duration, Instant};

/// Abstract LED driver trait
///
/// Implement this trait to support different hardware platforms.
/// The status ring is generic over this trait.
pub trait OutputDriver {
    /// Write colors to the LED strip
    fn write(&mut self, colors: &[Rgb]);
}
