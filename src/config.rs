//! Runtime tunables for the den.
//!
//! Every field has a default, so a host may pass an empty object or only the
//! values it wants to override.

use crate::error::DenError;
use crate::scheduler::Millis;
use serde::Deserialize;

/// Upper bound on `max_visible_logs`
pub const MAX_VISIBLE_LOGS_LIMIT: usize = 64;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DenConfig {
    /// Render loop cap (frames per second)
    pub target_fps: f64,
    /// Minimum time between automatic mode switches
    pub mode_interval_ms: Millis,
    /// How long a celebration holds the lock
    pub celebration_ms: Millis,
    /// Quiet period before a resize takes effect
    pub resize_debounce_ms: Millis,
    /// Log spawn delay is `min + random * spread`
    pub log_delay_min_ms: Millis,
    pub log_delay_spread_ms: Millis,
    /// Entries kept in the visible log stream
    pub max_visible_logs: usize,
    /// Anchor height as a fraction of the viewport height
    pub anchor_height_fraction: f32,
}

impl Default for DenConfig {
    fn default() -> Self {
        Self {
            target_fps: 30.0,
            mode_interval_ms: 4000.0,
            celebration_ms: 2500.0,
            resize_debounce_ms: 150.0,
            log_delay_min_ms: 300.0,
            log_delay_spread_ms: 700.0,
            max_visible_logs: 9,
            anchor_height_fraction: 0.85,
        }
    }
}

impl DenConfig {
    /// Parse from JSON, filling missing fields with defaults
    pub fn from_json(json: &str) -> Result<Self, DenError> {
        let config: DenConfig = serde_json::from_str(json)?;
        config.validated()
    }

    /// Reject values that would stall the render loop or blow up the log history
    pub fn validated(self) -> Result<Self, DenError> {
        if !(self.target_fps.is_finite() && self.target_fps > 0.0) {
            return Err(DenError::InvalidConfig(format!(
                "target_fps must be positive, got {}",
                self.target_fps
            )));
        }
        if !(0.0..=1.0).contains(&self.anchor_height_fraction) {
            return Err(DenError::InvalidConfig(format!(
                "anchor_height_fraction must be within 0..=1, got {}",
                self.anchor_height_fraction
            )));
        }
        if self.max_visible_logs > MAX_VISIBLE_LOGS_LIMIT {
            return Err(DenError::InvalidConfig(format!(
                "max_visible_logs must be at most {}, got {}",
                MAX_VISIBLE_LOGS_LIMIT, self.max_visible_logs
            )));
        }
        Ok(self)
    }

    /// Minimum time between rendered frames
    pub fn frame_interval_ms(&self) -> Millis {
        1000.0 / self.target_fps
    }
}

#[cfg(target_arch = "wasm32")]
impl DenConfig {
    /// Read from a JS object; `undefined` and `null` give the defaults
    pub fn from_js(value: wasm_bindgen::JsValue) -> Result<Self, DenError> {
        if value.is_undefined() || value.is_null() {
            return Ok(Self::default());
        }
        let config: DenConfig = serde_wasm_bindgen::from_value(value)
            .map_err(|e| DenError::InvalidConfig(e.to_string()))?;
        config.validated()
    }
}
