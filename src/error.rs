//! Structured error types for tablegrid.
//!
//! Interactive paths (gesture dispatch, point lookup) never fail; these errors
//! only come out of the DOM binding layer and the fixture loader.

/// All errors that can occur while binding to the DOM or loading geometry.
#[derive(Debug, thiserror::Error)]
pub enum TableError {
    /// A DOM API threw.
    #[error("DOM error: {0}")]
    Dom(String),

    /// No `window` or `document` is available.
    #[error("Missing DOM object: {0}")]
    MissingDom(&'static str),

    /// Table geometry with negative or non-finite sizes.
    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),

    /// JSON (de)serialization error.
    #[error("JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, TableError>;

#[cfg(target_arch = "wasm32")]
impl From<wasm_bindgen::JsValue> for TableError {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        Self::Dom(
            value
                .as_string()
                .unwrap_or_else(|| format!("{value:?}")),
        )
    }
}

#[cfg(target_arch = "wasm32")]
impl From<TableError> for wasm_bindgen::JsValue {
    fn from(e: TableError) -> Self {
        wasm_bindgen::JsValue::from_str(&e.to_string())
    }
}
