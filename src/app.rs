//! Browser bindings for the den.
//!
//! `App` owns one `DenState` plus the canvas it draws into and, optionally,
//! the element that shows the log stream. Host events are forwarded as-is.

use crate::config::DenConfig;
use crate::error::DenError;
use crate::logs::LogRecord;
use crate::scheduler::{Clock, PerformanceClock};
use crate::state::{DenState, FrameReport};
use crate::surface::CanvasSurface;
use crate::viewport::ViewportMetrics;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, Document, Element, HtmlCanvasElement};

/// Element that receives rendered log entries, newest on top
struct LogView {
    document: Document,
    container: Element,
    max_visible: usize,
}

impl LogView {
    fn show(&self, record: &LogRecord) -> Result<(), JsValue> {
        let entry = self.document.create_element("div")?;
        let [base, kind] = record.css_classes();
        entry.class_list().add_2(&base, &kind)?;
        entry.set_text_content(Some(&record.display_text()));
        self.container.prepend_with_node_1(&entry)?;

        while self.container.child_element_count() as usize > self.max_visible {
            match self.container.last_element_child() {
                Some(oldest) => oldest.remove(),
                None => break,
            }
        }
        Ok(())
    }
}

#[wasm_bindgen]
pub struct App {
    pub(crate) state: DenState,
    canvas: HtmlCanvasElement,
    surface: CanvasSurface,
    log_view: Option<LogView>,
    clock: PerformanceClock,
}

fn document() -> Result<Document, DenError> {
    web_sys::window()
        .ok_or(DenError::MissingGlobal("window"))?
        .document()
        .ok_or(DenError::MissingGlobal("document"))
}

fn random_seed() -> u64 {
    getrandom::u64().unwrap_or_else(|e| {
        log::warn!("OS randomness unavailable ({}), using a fixed seed", e);
        0x5eed_cafe
    })
}

impl App {
    pub(crate) fn build(
        canvas_id: &str,
        log_container_id: Option<&str>,
        config: DenConfig,
    ) -> Result<App, DenError> {
        let document = document()?;
        let canvas = document
            .get_element_by_id(canvas_id)
            .ok_or_else(|| DenError::ElementNotFound(canvas_id.to_string()))?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| DenError::NotACanvas(canvas_id.to_string()))?;
        let ctx = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .and_then(|ctx| ctx.dyn_into::<CanvasRenderingContext2d>().ok())
            .ok_or(DenError::ContextUnavailable)?;

        let log_view = match log_container_id {
            Some(id) => Some(LogView {
                container: document
                    .get_element_by_id(id)
                    .ok_or_else(|| DenError::ElementNotFound(id.to_string()))?,
                document: document.clone(),
                max_visible: config.max_visible_logs,
            }),
            None => None,
        };

        let clock = PerformanceClock::new().ok_or(DenError::MissingGlobal("performance"))?;

        Ok(App {
            state: DenState::new(config, random_seed()),
            canvas,
            surface: CanvasSurface::new(ctx),
            log_view,
            clock,
        })
    }

    /// Resize the canvas backing store and reset the device pixel transform
    fn apply_viewport(&self, metrics: &ViewportMetrics) {
        let (width, height) = metrics.backing_size();
        self.canvas.set_width(width);
        self.canvas.set_height(height);
        let style = self.canvas.style();
        let _ = style.set_property("width", &format!("{}px", metrics.css_width));
        let _ = style.set_property("height", &format!("{}px", metrics.css_height));
        self.surface.set_pixel_ratio(metrics.pixel_ratio as f64);
    }

    fn handle_report(&mut self, report: &FrameReport) {
        if let Some(metrics) = &report.resized {
            self.apply_viewport(metrics);
        }
        if let (Some(record), Some(view)) = (&report.spawned, &self.log_view) {
            if let Err(e) = view.show(record) {
                log::warn!("Failed to display log entry: {:?}", e);
            }
        }
    }

    pub(crate) fn now(&self) -> f64 {
        self.clock.now_ms()
    }
}

#[wasm_bindgen]
impl App {
    /// Attach to a canvas (and optionally a log container) by element id
    #[wasm_bindgen(constructor)]
    pub fn new(
        canvas_id: &str,
        log_container_id: Option<String>,
        config: JsValue,
    ) -> Result<App, JsValue> {
        crate::init_logging();
        let config = DenConfig::from_js(config)?;
        Ok(App::build(canvas_id, log_container_id.as_deref(), config)?)
    }

    /// Host frame callback (`requestAnimationFrame` timestamp).
    /// Returns true when the scene was redrawn.
    pub fn frame(&mut self, now: f64) -> bool {
        let report = self.state.frame(now, &mut self.surface);
        self.handle_report(&report);
        report.rendered
    }

    /// Set the viewport immediately, bypassing the debounce
    pub fn set_viewport(&mut self, css_width: f32, css_height: f32, pixel_ratio: f32) {
        let metrics = ViewportMetrics::new(css_width, css_height, pixel_ratio);
        self.state.set_viewport(metrics);
        self.apply_viewport(&metrics);
    }

    /// Forward a window resize event; applied after the debounce period
    pub fn resize(&mut self, css_width: f32, css_height: f32, pixel_ratio: f32) {
        let now = self.now();
        self.state
            .request_resize(now, ViewportMetrics::new(css_width, css_height, pixel_ratio));
    }

    /// Load the raw log resource text
    pub fn load_logs(&mut self, text: &str) {
        let now = self.now();
        self.state.load_logs(text, now);
    }

    /// Report that the log resource could not be loaded
    pub fn logs_unavailable(&mut self) {
        let now = self.now();
        self.state.logs_unavailable(now);
    }

    pub fn trigger_celebration(&mut self) {
        let now = self.now();
        self.state.trigger_celebration(now);
    }

    /// Current mode name
    pub fn mode(&self) -> String {
        self.state.mode().name().to_string()
    }

    pub fn is_locked(&self) -> bool {
        self.state.controller.is_locked()
    }

    pub fn scale(&self) -> f32 {
        self.state.viewport.scale
    }
}
