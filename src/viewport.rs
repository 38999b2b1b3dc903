use crate::scheduler::{Deadline, Millis};
use glam::Vec2;

/// Lower bound of the drawing scale
pub const MIN_SCALE: f32 = 0.6;
/// Upper bound of the drawing scale
pub const MAX_SCALE: f32 = 1.2;
/// Viewport size (CSS px) at which the scale is exactly 1
pub const REFERENCE_SIZE: f32 = 500.0;

/// Scale factor for a CSS viewport
pub fn scale_for(css_width: f32, css_height: f32) -> f32 {
    (css_width.min(css_height) / REFERENCE_SIZE).clamp(MIN_SCALE, MAX_SCALE)
}

/// Viewport dimensions and the derived drawing scale
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportMetrics {
    pub pixel_ratio: f32,
    pub css_width: f32,
    pub css_height: f32,
    pub scale: f32,
}

impl Default for ViewportMetrics {
    fn default() -> Self {
        Self::new(REFERENCE_SIZE, REFERENCE_SIZE, 1.0)
    }
}

impl ViewportMetrics {
    pub fn new(css_width: f32, css_height: f32, pixel_ratio: f32) -> Self {
        let pixel_ratio = if pixel_ratio > 0.0 { pixel_ratio } else { 1.0 };
        Self {
            pixel_ratio,
            css_width,
            css_height,
            scale: scale_for(css_width, css_height),
        }
    }

    /// Figure anchor: horizontally centred, `height_fraction` of the way down
    pub fn anchor(&self, height_fraction: f32) -> Vec2 {
        Vec2::new(self.css_width * 0.5, self.css_height * height_fraction)
    }

    /// Backing store size in device pixels
    pub fn backing_size(&self) -> (u32, u32) {
        (
            (self.css_width * self.pixel_ratio).round().max(0.0) as u32,
            (self.css_height * self.pixel_ratio).round().max(0.0) as u32,
        )
    }
}

/// Collapses a burst of resize events into the last one
#[derive(Debug, Clone, Default)]
pub struct ResizeDebouncer {
    pending: Option<ViewportMetrics>,
    deadline: Deadline,
    delay_ms: Millis,
}

impl ResizeDebouncer {
    pub fn new(delay_ms: Millis) -> Self {
        Self {
            pending: None,
            deadline: Deadline::idle(),
            delay_ms,
        }
    }

    /// Record a resize event, cancelling any recomputation still pending
    pub fn request(&mut self, now: Millis, metrics: ViewportMetrics) {
        self.pending = Some(metrics);
        self.deadline.arm_after(now, self.delay_ms);
    }

    /// The settled metrics, once the quiet period has passed
    pub fn poll(&mut self, now: Millis) -> Option<ViewportMetrics> {
        if self.deadline.fire(now) {
            self.pending.take()
        } else {
            None
        }
    }
}
