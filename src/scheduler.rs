//! Time source and single-shot deadlines.
//!
//! Timer callbacks (celebration unlock, next log spawn, debounced resize) are
//! modelled as [`Deadline`]s that the owner polls with the current time. Tests
//! drive them with a [`ManualClock`] instead of waiting on real timers.

use std::cell::Cell;

/// Monotonic milliseconds (matches `performance.now()`)
pub type Millis = f64;

/// Source of monotonic time
pub trait Clock {
    fn now_ms(&self) -> Millis;
}

/// Manually advanced clock for deterministic tests and replays
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<Millis>,
}

impl ManualClock {
    pub fn new(start: Millis) -> Self {
        Self {
            now: Cell::new(start),
        }
    }

    pub fn advance(&self, delta_ms: Millis) -> Millis {
        let now = self.now.get() + delta_ms;
        self.now.set(now);
        now
    }

    pub fn set(&self, now: Millis) {
        self.now.set(now);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> Millis {
        self.now.get()
    }
}

#[cfg(target_arch = "wasm32")]
pub use browser::PerformanceClock;

#[cfg(target_arch = "wasm32")]
mod browser {
    use super::{Clock, Millis};

    /// `window.performance.now()`
    pub struct PerformanceClock {
        performance: web_sys::Performance,
    }

    impl PerformanceClock {
        /// None when the host exposes no `performance` object
        pub fn new() -> Option<Self> {
            let performance = web_sys::window()?.performance()?;
            Some(Self { performance })
        }
    }

    impl Clock for PerformanceClock {
        fn now_ms(&self) -> Millis {
            self.performance.now()
        }
    }
}

/// Single-shot timer.
///
/// Re-arming replaces any pending fire time, which gives both "restart the
/// window" and debounce semantics.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Deadline {
    at: Option<Millis>,
}

impl Deadline {
    pub const fn idle() -> Self {
        Self { at: None }
    }

    /// Arm to fire at an absolute time
    pub fn arm(&mut self, at: Millis) {
        self.at = Some(at);
    }

    /// Arm to fire `delay_ms` after `now`
    pub fn arm_after(&mut self, now: Millis, delay_ms: Millis) {
        self.arm(now + delay_ms);
    }

    pub fn cancel(&mut self) {
        self.at = None;
    }

    pub fn is_armed(&self) -> bool {
        self.at.is_some()
    }

    pub fn fire_time(&self) -> Option<Millis> {
        self.at
    }

    /// Returns true exactly once when `now` reaches the fire time
    pub fn fire(&mut self, now: Millis) -> bool {
        match self.at {
            Some(at) if now >= at => {
                self.at = None;
                true
            }
            _ => false,
        }
    }
}
