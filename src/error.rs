use thiserror::Error;

/// Errors raised while wiring the den into a host page.
/// The animation core itself has no failure paths.
#[derive(Debug, Error)]
pub enum DenError {
    #[error("no global `{0}` available")]
    MissingGlobal(&'static str),

    #[error("element `#{0}` not found")]
    ElementNotFound(String),

    #[error("element `#{0}` is not a canvas")]
    NotACanvas(String),

    #[error("2D context unavailable")]
    ContextUnavailable,

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("failed to parse config JSON: {0}")]
    ConfigJson(#[from] serde_json::Error),

    #[error("log fetch failed: {0}")]
    LogFetch(String),
}

#[cfg(target_arch = "wasm32")]
impl From<DenError> for wasm_bindgen::JsValue {
    fn from(err: DenError) -> Self {
        wasm_bindgen::JsValue::from_str(&err.to_string())
    }
}
