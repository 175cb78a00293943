//! WebAssembly bindings for formexpr rule expressions.
//!
//! Exposes the engine to browsers and Node.js with the same result shapes as
//! the Rust API. All calls share the process-wide default engine, so parsed
//! expressions are cached across calls.
//!
//! # Example
//!
//! ```javascript
//! import init, { evaluateExpression, getDependencies } from '@formexpr/wasm';
//!
//! await init();
//!
//! const context = {
//!   ctx: { vehicle: { mileage: 150000 } },
//!   fields: { vin: { value: 'YV1LZ', valid: true } },
//! };
//!
//! evaluateExpression('ctx.vehicle.mileage > 100000 && fields.vin.valid', context);
//! // => { success: true, value: true }
//!
//! getDependencies('fields.vin.valid && ctx.vehicle.mileage > 100000');
//! // => ['ctx.vehicle.mileage', 'fields.vin.valid']
//! ```

mod error;

pub use error::{BindingError, ErrorCode};

use formexpr_core::{EvaluationResult, ExpressionContext};
use serde::Serialize;
use wasm_bindgen::prelude::*;

/// Initialize the WASM module.
///
/// Sets up panic hooks for better error messages in the browser console.
/// Called automatically by wasm-pack's generated JavaScript.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// Get the version of the formexpr-wasm library.
#[wasm_bindgen(js_name = getVersion)]
pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Evaluates `source` against `context` (`{ ctx, fields }`).
///
/// Returns `{ success, value?, error? }`. A context of the wrong shape
/// fails closed like any other evaluation error.
#[wasm_bindgen(js_name = evaluateExpression)]
pub fn evaluate_expression(source: &str, context: JsValue) -> Result<JsValue, JsValue> {
    let result = match parse_context(context) {
        Ok(context) => formexpr_core::evaluate_expression(source, &context),
        Err(e) => {
            log::debug!("Rejecting context for '{}': {}", source, e);
            EvaluationResult::failure(e.message())
        }
    };
    Ok(to_js(&result)?)
}

/// Returns `{ valid, error? }`.
#[wasm_bindgen(js_name = validateExpression)]
pub fn validate_expression(source: &str) -> Result<JsValue, JsValue> {
    Ok(to_js(&formexpr_core::validate_expression(source))?)
}

/// Returns the sorted list of `ctx.*` and `fields.*` paths `source` reads.
#[wasm_bindgen(js_name = getDependencies)]
pub fn get_dependencies(source: &str) -> Result<JsValue, JsValue> {
    Ok(to_js(&formexpr_core::get_dependencies(source))?)
}

fn parse_context(context: JsValue) -> Result<ExpressionContext, BindingError> {
    if context.is_undefined() || context.is_null() {
        return Ok(ExpressionContext::default());
    }
    serde_wasm_bindgen::from_value(context).map_err(BindingError::context)
}

/// Serializes maps as plain objects rather than `Map` instances.
fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, BindingError> {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(BindingError::serialization)
}
