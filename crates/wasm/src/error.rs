//! Error handling for WASM bindings.
//!
//! Expression failures are reported inside result objects, never thrown.
//! Only failures crossing the JavaScript boundary itself end up here.

use thiserror::Error;
use wasm_bindgen::prelude::*;

/// Error codes for TypeScript consumption.
#[wasm_bindgen]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// The context object did not have the expected shape
    Context,
    /// A result could not be converted to a JavaScript value
    Serialization,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::Context => "CONTEXT_ERROR",
            ErrorCode::Serialization => "SERIALIZATION_ERROR",
        }
    }
}

#[derive(Error, Debug)]
#[error("{message}")]
pub struct BindingError {
    code: ErrorCode,
    message: String,
}

impl BindingError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn code(&self) -> ErrorCode {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn context(err: serde_wasm_bindgen::Error) -> Self {
        Self::new(ErrorCode::Context, format!("Invalid expression context: {}", err))
    }

    pub fn serialization(err: serde_wasm_bindgen::Error) -> Self {
        Self::new(ErrorCode::Serialization, err.to_string())
    }
}

impl From<BindingError> for JsValue {
    fn from(err: BindingError) -> Self {
        let js_error = js_sys::Error::new(&err.message);
        js_sys::Reflect::set(
            &js_error,
            &"code".into(),
            &JsValue::from_str(err.code.as_str()),
        )
        .ok();
        js_error.into()
    }
}
