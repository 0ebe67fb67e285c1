//! Interrupt-safe input snapshots and control flags
//!
//! Button and encoder handlers run in interrupt context and only write
//! here. The tick loop reads a snapshot at the start of every tick and
//! never waits on the handlers.

use core::cell::Cell;
use core::sync::atomic::{AtomicBool, Ordering};

use critical_section::Mutex;

/// Inputs captured at the start of a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InputSnapshot {
    /// Debounced button level
    pub button_pressed: bool,
    /// Volume set by the encoder since the previous snapshot
    pub reported_volume: Option<u8>,
}

/// Inputs shared between interrupt handlers and the tick loop.
///
/// Backed by a critical-section protected cell, so it is safe to use from
/// interrupts and threads alike.
pub struct InputSignals {
    inner: Mutex<Cell<InputSnapshot>>,
}

impl InputSignals {
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(Cell::new(InputSnapshot {
                button_pressed: false,
                reported_volume: None,
            })),
        }
    }

    /// Update the button level
    pub fn set_button_pressed(&self, pressed: bool) {
        critical_section::with(|cs| {
            let cell = self.inner.borrow(cs);
            cell.set(InputSnapshot {
                button_pressed: pressed,
                ..cell.get()
            });
        });
    }

    /// Record a volume the encoder just applied. Replaces any unread report.
    pub fn report_volume(&self, volume: u8) {
        critical_section::with(|cs| {
            let cell = self.inner.borrow(cs);
            cell.set(InputSnapshot {
                reported_volume: Some(volume),
                ..cell.get()
            });
        });
    }

    /// Read the inputs and consume the pending volume report
    pub fn snapshot(&self) -> InputSnapshot {
        critical_section::with(|cs| {
            let cell = self.inner.borrow(cs);
            let snapshot = cell.get();
            cell.set(InputSnapshot {
                reported_volume: None,
                ..snapshot
            });
            snapshot
        })
    }
}

impl Default for InputSignals {
    fn default() -> Self {
        Self::new()
    }
}

/// Process-wide shutdown and kill requests
///
/// Written by the signal handling context, read by the tick loop.
pub struct ControlFlags {
    shutdown: AtomicBool,
    kill: AtomicBool,
}

impl ControlFlags {
    pub const fn new() -> Self {
        Self {
            shutdown: AtomicBool::new(false),
            kill: AtomicBool::new(false),
        }
    }

    /// Ask for a graceful shutdown. The shutdown animation plays to the end.
    pub fn request_shutdown(&self) {
        self.shutdown.store(true, Ordering::Release);
    }

    /// Ask for an immediate stop. Blanks the ring without animation.
    pub fn request_kill(&self) {
        self.kill.store(true, Ordering::Release);
    }

    pub fn shutdown_requested(&self) -> bool {
        self.shutdown.load(Ordering::Acquire)
    }

    pub fn kill_requested(&self) -> bool {
        self.kill.load(Ordering::Acquire)
    }
}

impl Default for ControlFlags {
    fn default() -> Self {
        Self::new()
    }
}
