use embassy_time::Duration;

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::animation::AnimationSlot;
use crate::color::Rgb;
use crate::scene::{Scene, SceneBank};

/// Arbitrates between the active scene and the requested one
///
/// A request replaces the active scene on the next tick, unless the active
/// animation waits for its own finish. In that case the request stays
/// pending and the active animation keeps ticking until it completes.
#[derive(Debug, Clone)]
pub struct AnimationScheduler<const N: usize> {
    bank: SceneBank<N>,
    active: Option<Scene>,
    requested: Option<Scene>,
    /// A deferral has already been reported for the pending request
    deferred: bool,
}

impl<const N: usize> AnimationScheduler<N> {
    pub const fn new(bank: SceneBank<N>) -> Self {
        Self {
            bank,
            active: None,
            requested: None,
            deferred: false,
        }
    }

    /// Record the scene that should become active
    ///
    /// Does not touch the frame.
    pub fn request(&mut self, scene: Scene) {
        if self.requested != Some(scene) {
            self.deferred = false;
        }
        self.requested = Some(scene);
    }

    pub const fn active(&self) -> Option<Scene> {
        self.active
    }

    pub const fn requested(&self) -> Option<Scene> {
        self.requested
    }

    /// Animation of the active scene
    pub fn active_slot(&self) -> Option<&AnimationSlot<N>> {
        self.active.map(|scene| self.bank.get(scene))
    }

    /// Check if the active scene is `scene` and its animation has finished
    pub fn is_finished(&self, scene: Scene) -> bool {
        self.active == Some(scene) && self.bank.get(scene).is_finished()
    }

    pub const fn bank(&self) -> &SceneBank<N> {
        &self.bank
    }

    pub fn bank_mut(&mut self) -> &mut SceneBank<N> {
        &mut self.bank
    }

    /// Apply the pending request if allowed, then tick the active animation
    ///
    /// Returns the scene that was ticked.
    pub fn tick(&mut self, dt: Duration, leds: &mut [Rgb]) -> Option<Scene> {
        self.process_request();

        let scene = self.active?;
        self.bank.get_mut(scene).tick(dt, leds);
        Some(scene)
    }

    fn process_request(&mut self) {
        let Some(requested) = self.requested else {
            return;
        };
        if self.active == Some(requested) {
            self.requested = None;
            return;
        }
        if !self.can_switch() {
            #[cfg(feature = "esp32-log")]
            if !self.deferred {
                println!(
                    "[scheduler] {} deferred until {} finishes",
                    requested.as_str(),
                    self.active.map_or("none", Scene::as_str)
                );
            }
            self.deferred = true;
            return;
        }

        #[cfg(feature = "esp32-log")]
        println!(
            "[scheduler] {} -> {} ({})",
            self.active.map_or("none", Scene::as_str),
            requested.as_str(),
            self.bank.get(requested).name()
        );

        self.bank.get_mut(requested).reset();
        self.active = Some(requested);
        self.requested = None;
        self.deferred = false;
    }

    /// The active scene may be replaced
    fn can_switch(&self) -> bool {
        match self.active_slot() {
            None => true,
            Some(slot) => !slot.waits_for_finish() || slot.is_finished(),
        }
    }
}
