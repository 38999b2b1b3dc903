//! Page runtime: wires an `App` to the browser's frame, resize and fetch APIs.

use crate::app::App;
use crate::config::DenConfig;
use crate::error::DenError;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Response, Window};

fn window() -> Result<Window, DenError> {
    web_sys::window().ok_or(DenError::MissingGlobal("window"))
}

/// Current CSS viewport size and device pixel ratio
fn viewport_of(window: &Window) -> (f32, f32, f32) {
    let css = |v: Result<JsValue, JsValue>| v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0) as f32;
    (
        css(window.inner_width()),
        css(window.inner_height()),
        window.device_pixel_ratio() as f32,
    )
}

/// Fetch the log resource as text
async fn fetch_text(window: &Window, url: &str) -> Result<String, DenError> {
    let fetch_err = |e: JsValue| DenError::LogFetch(format!("{:?}", e));

    let response: Response = JsFuture::from(window.fetch_with_str(url))
        .await
        .map_err(fetch_err)?
        .dyn_into()
        .map_err(fetch_err)?;
    if !response.ok() {
        return Err(DenError::LogFetch(format!("HTTP {}", response.status())));
    }

    JsFuture::from(response.text().map_err(fetch_err)?)
        .await
        .map_err(fetch_err)?
        .as_string()
        .ok_or_else(|| DenError::LogFetch("response body is not text".to_string()))
}

/// Start the den on a page.
///
/// Draws into `canvas_id`, streams logs from `log_url` into
/// `log_container_id`, follows window resizes and runs the render loop for
/// the lifetime of the page.
#[wasm_bindgen]
pub async fn start(
    canvas_id: String,
    log_container_id: String,
    log_url: String,
    config: JsValue,
) -> Result<(), JsValue> {
    crate::init_logging();
    let config = DenConfig::from_js(config)?;
    let window = window()?;

    let app = Rc::new(RefCell::new(App::build(
        &canvas_id,
        Some(&log_container_id),
        config,
    )?));

    {
        let (w, h, dpr) = viewport_of(&window);
        app.borrow_mut().set_viewport(w, h, dpr);
    }

    // Resize events are debounced inside the den
    {
        let app = app.clone();
        let win = window.clone();
        let on_resize = Closure::wrap(Box::new(move || {
            let (w, h, dpr) = viewport_of(&win);
            app.borrow_mut().resize(w, h, dpr);
        }) as Box<dyn FnMut()>);
        window.add_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref())?;
        on_resize.forget();
    }

    // Render loop. The closure re-schedules itself through `f`.
    let f: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>> = Rc::new(RefCell::new(None));
    let g = f.clone();
    {
        let app = app.clone();
        let win = window.clone();
        *g.borrow_mut() = Some(Closure::wrap(Box::new(move |now: f64| {
            app.borrow_mut().frame(now);
            if let Some(cb) = f.borrow().as_ref() {
                if let Err(e) = win.request_animation_frame(cb.as_ref().unchecked_ref()) {
                    log::error!("requestAnimationFrame failed: {:?}", e);
                }
            }
        }) as Box<dyn FnMut(f64)>));
    }
    if let Some(cb) = g.borrow().as_ref() {
        window.request_animation_frame(cb.as_ref().unchecked_ref())?;
    }
    log::info!("Den started on #{}", canvas_id);

    match fetch_text(&window, &log_url).await {
        Ok(text) => app.borrow_mut().load_logs(&text),
        Err(e) => {
            log::warn!("Error loading logs: {}", e);
            app.borrow_mut().logs_unavailable();
        }
    }

    Ok(())
}
