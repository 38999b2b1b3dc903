//! Centralized den state with context passing.
//!
//! `DenState` owns every piece of mutable animation state: the mode
//! controller, frame pacing, viewport and log stream. Core functions take
//! explicit references; the browser bindings in `app` are thin wrappers that
//! own one `DenState` and forward host events to it. Nothing here touches a
//! global.

use crate::config::DenConfig;
use crate::controller::StateController;
use crate::den_constants::MAX_FRAME;
use crate::logs::{LogRecord, LogStream};
use crate::mode::Mode;
use crate::scene;
use crate::scheduler::Millis;
use crate::surface::Surface;
use crate::viewport::{ResizeDebouncer, ViewportMetrics};
use rand::rngs::SmallRng;
use rand::SeedableRng;

/// Caps the render rate independently of the host's refresh rate
#[derive(Debug, Clone, Copy)]
pub struct FrameLimiter {
    interval_ms: Millis,
    last: Option<Millis>,
}

impl FrameLimiter {
    pub fn new(interval_ms: Millis) -> Self {
        Self {
            interval_ms,
            last: None,
        }
    }

    /// True when a frame should be drawn at `now`; records it as drawn
    pub fn ready(&mut self, now: Millis) -> bool {
        match self.last {
            Some(last) if now - last < self.interval_ms => false,
            _ => {
                self.last = Some(now);
                true
            }
        }
    }
}

/// Frame counter that wraps at `MAX_FRAME`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameCounter(u32);

impl FrameCounter {
    pub fn get(self) -> u32 {
        self.0
    }

    /// Increment with wrap-around and return the new value
    pub fn advance(&mut self) -> u32 {
        self.0 = (self.0 + 1) % MAX_FRAME;
        self.0
    }
}

/// What happened during one host frame callback
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameReport {
    /// A debounced resize settled and was applied
    pub resized: Option<ViewportMetrics>,
    /// A log record was spawned and should be displayed
    pub spawned: Option<LogRecord>,
    /// The scene was redrawn
    pub rendered: bool,
}

pub struct DenState {
    pub config: DenConfig,
    pub controller: StateController,
    pub limiter: FrameLimiter,
    pub frame: FrameCounter,
    pub viewport: ViewportMetrics,
    pub resize: ResizeDebouncer,
    pub logs: LogStream,
    rng: SmallRng,
}

impl DenState {
    /// Create den state; `seed` drives every random choice
    pub fn new(config: DenConfig, seed: u64) -> Self {
        Self {
            controller: StateController::new(&config),
            limiter: FrameLimiter::new(config.frame_interval_ms()),
            frame: FrameCounter::default(),
            viewport: ViewportMetrics::default(),
            resize: ResizeDebouncer::new(config.resize_debounce_ms),
            logs: LogStream::new(&config),
            rng: SmallRng::seed_from_u64(seed),
            config,
        }
    }

    pub fn mode(&self) -> Mode {
        self.controller.mode()
    }

    /// Apply viewport metrics immediately (initial load)
    pub fn set_viewport(&mut self, metrics: ViewportMetrics) {
        self.viewport = metrics;
    }

    /// Queue a resize; only the last one in a burst takes effect
    pub fn request_resize(&mut self, now: Millis, metrics: ViewportMetrics) {
        self.resize.request(now, metrics);
    }

    pub fn load_logs(&mut self, text: &str, now: Millis) {
        self.logs.load_text(text, now);
    }

    /// Log resource failed to load: show the fallback record instead
    pub fn logs_unavailable(&mut self, now: Millis) {
        log::warn!("Logs unavailable, using local fallback");
        self.logs.load_fallback(now);
    }

    pub fn trigger_celebration(&mut self, now: Millis) {
        self.controller.trigger_celebration(now);
    }

    /// React to a record being displayed
    pub fn on_log_displayed(&mut self, record: &LogRecord, now: Millis) {
        if record.is_celebration() {
            self.trigger_celebration(now);
        }
    }

    /// Run due timers: settled resize, log spawn, celebration unlock
    pub fn poll_timers(&mut self, now: Millis) -> FrameReport {
        let mut report = FrameReport::default();

        if let Some(metrics) = self.resize.poll(now) {
            self.viewport = metrics;
            report.resized = Some(metrics);
        }

        if let Some(record) = self.logs.poll(now, &mut self.rng) {
            self.on_log_displayed(&record, now);
            report.spawned = Some(record);
        }

        self.controller.poll_timers(now);
        report
    }

    /// Draw one frame if the rate cap allows it.
    /// The mode update strictly precedes rendering.
    pub fn render_tick<S: Surface + ?Sized>(&mut self, now: Millis, surface: &mut S) -> bool {
        if !self.limiter.ready(now) {
            return false;
        }

        let viewport = self.viewport;
        surface.clear(viewport.css_width, viewport.css_height);

        self.controller.tick(now, &mut self.rng);
        let frame = self.frame.advance();

        scene::render(
            surface,
            viewport.anchor(self.config.anchor_height_fraction),
            frame,
            self.controller.mode(),
            viewport.scale,
        );
        true
    }

    /// Host frame callback: timers first, then the throttled render
    pub fn frame<S: Surface + ?Sized>(&mut self, now: Millis, surface: &mut S) -> FrameReport {
        let mut report = self.poll_timers(now);
        report.rendered = self.render_tick(now, surface);
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logs::parse_logs;
    use crate::scheduler::{Clock, ManualClock};
    use crate::surface::{DrawCommand, Recorder};
    use wasm_bindgen_test::*;

    #[test]
    #[wasm_bindgen_test]
    fn test_limiter_skips_early_ticks() {
        let mut limiter = FrameLimiter::new(1000.0 / 30.0);
        assert!(limiter.ready(0.0));
        assert!(!limiter.ready(16.7));
        assert!(!limiter.ready(33.0));
        assert!(limiter.ready(33.4));
        assert!(!limiter.ready(50.0));
    }

    #[test]
    #[wasm_bindgen_test]
    fn test_frame_counter_wraps() {
        let mut counter = FrameCounter(MAX_FRAME - 2);
        assert_eq!(counter.advance(), MAX_FRAME - 1);
        assert_eq!(counter.advance(), 0);
        assert_eq!(counter.advance(), 1);
    }

    #[test]
    #[wasm_bindgen_test]
    fn test_skipped_tick_draws_nothing() {
        let mut den = DenState::new(DenConfig::default(), 1);
        let mut surface = Recorder::new();

        assert!(den.frame(0.0, &mut surface).rendered);
        surface.clear_commands();
        let report = den.frame(10.0, &mut surface);

        assert!(!report.rendered);
        assert!(surface.commands.is_empty());
        assert_eq!(den.frame.get(), 1);
    }

    #[test]
    #[wasm_bindgen_test]
    fn test_frame_clears_then_draws_at_anchor() {
        let mut den = DenState::new(DenConfig::default(), 1);
        den.set_viewport(ViewportMetrics::new(800.0, 600.0, 1.0));
        let mut surface = Recorder::new();
        den.frame(0.0, &mut surface);

        assert_eq!(
            surface.commands[0],
            DrawCommand::Clear {
                width: 800.0,
                height: 600.0
            }
        );
        // Spine starts at the anchor
        let anchor = den.viewport.anchor(0.85);
        let spine = surface.shapes().nth(7).cloned();
        assert_eq!(
            spine,
            Some(DrawCommand::Line {
                from: anchor,
                to: scene_neck(&den, anchor)
            })
        );
    }

    fn scene_neck(den: &DenState, anchor: glam::Vec2) -> glam::Vec2 {
        crate::pose::Pose::compute(anchor, den.frame.get(), den.mode(), den.viewport.scale).neck
    }

    #[test]
    #[wasm_bindgen_test]
    fn test_mode_changes_over_simulated_time() {
        let clock = ManualClock::new(0.0);
        let mut den = DenState::new(DenConfig::default(), 11);
        let mut surface = Recorder::new();

        let start = den.controller.last_mode_change();
        while clock.now_ms() <= 4100.0 {
            den.frame(clock.now_ms(), &mut surface);
            clock.advance(1000.0 / 60.0);
        }
        assert!(den.controller.last_mode_change() > start + 4000.0);
        assert!(Mode::AMBIENT.contains(&den.mode()));
    }

    #[test]
    #[wasm_bindgen_test]
    fn test_resize_applies_after_debounce() {
        let mut den = DenState::new(DenConfig::default(), 2);
        let mut surface = Recorder::new();
        den.request_resize(0.0, ViewportMetrics::new(100.0, 100.0, 1.0));
        den.request_resize(100.0, ViewportMetrics::new(1000.0, 1000.0, 2.0));

        assert_eq!(den.frame(200.0, &mut surface).resized, None);
        let report = den.frame(250.0, &mut surface);
        assert_eq!(report.resized.map(|m| m.scale), Some(1.2));
        assert_eq!(den.viewport.pixel_ratio, 2.0);
    }

    #[test]
    #[wasm_bindgen_test]
    fn test_git_push_celebrates_in_same_tick() {
        let text = "[CODE] git push origin master\n[SYS] boot ok\n";
        let records = parse_logs(text);
        assert_eq!(records.len(), 2);

        let clock = ManualClock::new(0.0);
        let mut den = DenState::new(DenConfig::default(), 5);
        let mut surface = Recorder::new();
        den.load_logs(text, clock.now_ms());

        let mut celebrated = false;
        for _ in 0..2000 {
            let now = clock.advance(1000.0 / 30.0);
            let report = den.frame(now, &mut surface);
            if let Some(record) = report.spawned {
                if record == records[0] {
                    assert_eq!(den.mode(), Mode::Dabbing);
                    assert!(den.controller.is_locked());
                    assert_eq!(den.controller.last_mode_change(), now);
                    celebrated = true;
                    break;
                }
            }
        }
        assert!(celebrated, "git push record was never displayed");
    }

    #[test]
    #[wasm_bindgen_test]
    fn test_fallback_never_celebrates() {
        let mut den = DenState::new(DenConfig::default(), 9);
        let mut surface = Recorder::new();
        den.logs_unavailable(0.0);

        let report = den.frame(0.0, &mut surface);
        assert_eq!(report.spawned, Some(LogRecord::fallback()));
        assert_eq!(den.mode(), Mode::Coding);
    }
}
