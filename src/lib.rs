//! Hacker Den - Wasm Core
//!
//! Animated stick-figure avatar at a desk plus a simulated terminal log
//! stream, drawn on a 2D canvas from Rust via wasm-bindgen.

#[cfg(target_arch = "wasm32")]
mod app;
pub mod config;
pub mod controller;
mod den_constants;
pub mod error;
pub mod logs;
pub mod mode;
pub mod pose;
#[cfg(target_arch = "wasm32")]
mod runtime;
pub mod scene;
pub mod scheduler;
pub mod state;
pub mod surface;
pub mod viewport;

use wasm_bindgen::prelude::*;

// Re-exports for WASM API
#[cfg(target_arch = "wasm32")]
pub use app::App;
#[cfg(target_arch = "wasm32")]
pub use runtime::start;

pub use config::DenConfig;
pub use controller::StateController;
pub use den_constants::MAX_FRAME;
pub use error::DenError;
pub use glam::Vec2;
pub use logs::{parse_logs, LogRecord, LogStream};
pub use mode::Mode;
pub use scene::render;
pub use state::DenState;
pub use surface::{DrawCommand, Recorder, Surface};
pub use viewport::ViewportMetrics;

/// Install the panic hook and console logger (idempotent)
pub fn init_logging() {
    cfg_if::cfg_if! {
        if #[cfg(target_arch = "wasm32")] {
            console_error_panic_hook::set_once();
            console_log::init_with_level(log::Level::Info).ok();
        }
    }
}

/// Log to browser console
#[wasm_bindgen]
pub fn log(msg: &str) {
    log::info!("{}", msg);
}

/// Scale factor the den would use for a viewport (exposed for page layout)
#[wasm_bindgen]
pub fn scale_for_viewport(css_width: f32, css_height: f32) -> f32 {
    viewport::scale_for(css_width, css_height)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;
    wasm_bindgen_test_configure!(run_in_browser);

    #[test]
    #[wasm_bindgen_test]
    fn test_scale_for_viewport_matches_metrics() {
        assert_eq!(scale_for_viewport(500.0, 500.0), 1.0);
        assert_eq!(
            scale_for_viewport(640.0, 480.0),
            ViewportMetrics::new(640.0, 480.0, 1.0).scale
        );
    }
}
