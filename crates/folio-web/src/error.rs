#![forbid(unsafe_code)]

//! Errors from browser APIs.

use std::fmt;

use folio_runtime::storage::StorageError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WebError {
    /// A global (`window`, `document`, ...) is missing in this context.
    MissingGlobal(&'static str),
    /// No element with this DOM id.
    MissingElement(String),
    /// A browser call threw.
    Js(String),
}

impl fmt::Display for WebError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingGlobal(name) => write!(f, "`{name}` is not available"),
            Self::MissingElement(id) => write!(f, "no element with id `{id}`"),
            Self::Js(msg) => write!(f, "browser call failed: {msg}"),
        }
    }
}

impl std::error::Error for WebError {}

impl From<WebError> for StorageError {
    fn from(e: WebError) -> Self {
        StorageError::Unavailable(e.to_string())
    }
}

#[cfg(target_arch = "wasm32")]
impl From<wasm_bindgen::JsValue> for WebError {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        Self::Js(js_message(&value))
    }
}

/// Best-effort text for a thrown JS value.
#[cfg(target_arch = "wasm32")]
pub(crate) fn js_message(value: &wasm_bindgen::JsValue) -> String {
    use wasm_bindgen::JsCast;

    if let Some(text) = value.as_string() {
        return text;
    }
    if let Some(error) = value.dyn_ref::<js_sys::Error>() {
        return String::from(error.message());
    }
    format!("{value:?}")
}

pub type Result<T> = std::result::Result<T, WebError>;
