//! Error types for the layout engine
//!
//! Invalid comment assignments are not errors: they are part of the layout
//! result. These variants cover faults in the host page or misuse of the
//! engine's lifecycle.

use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    /// The reference container the comments are sized against is missing
    #[error("no reference container with class '{0}' found on the page")]
    MissingContainer(String),

    /// Setup already transformed the page
    #[error("line comments have already been set up")]
    AlreadySetUp,

    /// Reposition requested before the page was set up
    #[error("line comments must be set up before they can be repositioned")]
    NotSetUp,

    /// A DOM operation failed
    #[error("DOM operation failed: {0}")]
    Dom(String),
}

impl LayoutError {
    /// Wrap an exception thrown by a DOM call
    pub fn from_js(value: &JsValue) -> Self {
        LayoutError::Dom(value.as_string().unwrap_or_else(|| format!("{:?}", value)))
    }
}
