//! Mode state machine.
//!
//! Coding, gaming and writing rotate at random every few seconds. A
//! celebration forces dabbing and locks the rotation until its unlock
//! deadline fires. Unlocking does not revert the pose: dabbing stays on screen
//! until the next regular switch.

use crate::config::DenConfig;
use crate::mode::Mode;
use crate::scheduler::{Deadline, Millis};
use rand::Rng;

#[derive(Debug, Clone)]
pub struct StateController {
    mode: Mode,
    last_mode_change: Millis,
    locked: bool,
    unlock: Deadline,
    mode_interval_ms: Millis,
    celebration_ms: Millis,
}

impl Default for StateController {
    fn default() -> Self {
        Self::new(&DenConfig::default())
    }
}

impl StateController {
    pub fn new(config: &DenConfig) -> Self {
        Self {
            mode: Mode::default(),
            last_mode_change: 0.0,
            locked: false,
            unlock: Deadline::idle(),
            mode_interval_ms: config.mode_interval_ms,
            celebration_ms: config.celebration_ms,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn last_mode_change(&self) -> Millis {
        self.last_mode_change
    }

    /// Time at which the current celebration lock expires, if any
    pub fn unlock_at(&self) -> Option<Millis> {
        self.unlock.fire_time()
    }

    /// Run the pending unlock if it is due
    pub fn poll_timers(&mut self, now: Millis) {
        if self.unlock.fire(now) {
            self.locked = false;
            log::debug!("Celebration lock released at {:.0}ms", now);
        }
    }

    /// Advance the state machine.
    ///
    /// Returns true when a new mode was picked (it may equal the previous one).
    pub fn tick<R: Rng + ?Sized>(&mut self, now: Millis, rng: &mut R) -> bool {
        self.poll_timers(now);

        if self.locked || now - self.last_mode_change <= self.mode_interval_ms {
            return false;
        }

        let previous = self.mode;
        self.mode = Mode::AMBIENT[rng.random_range(0..Mode::AMBIENT.len())];
        self.last_mode_change = now;
        log::debug!("Mode {} -> {}", previous, self.mode);
        true
    }

    /// Force the dabbing pose and lock it for the celebration window.
    /// Re-triggering restarts the window.
    pub fn trigger_celebration(&mut self, now: Millis) {
        self.mode = Mode::Dabbing;
        self.locked = true;
        self.last_mode_change = now;
        self.unlock.arm_after(now, self.celebration_ms);
        log::info!("Celebration triggered at {:.0}ms", now);
    }
}
