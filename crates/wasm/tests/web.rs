//! WebAssembly integration tests.
//!
//! These tests run in a headless browser using wasm-bindgen-test.
//!
//! Run with: wasm-pack test --headless --chrome crates/wasm

use serde::Serialize;
use serde_json::{Value, json};
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn js(value: Value) -> JsValue {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .expect("should convert to JsValue")
}

fn rust(value: JsValue) -> Value {
    serde_wasm_bindgen::from_value(value).expect("should convert from JsValue")
}

#[wasm_bindgen_test]
fn test_init() {
    let version = formexpr_wasm::get_version();
    assert!(!version.is_empty());
}

#[wasm_bindgen_test]
fn test_evaluate_expression() {
    let context = js(json!({
        "ctx": { "vehicle": { "mileage": 150000 } },
        "fields": { "vin": { "value": "YV1LZ", "valid": true } }
    }));
    let result = formexpr_wasm::evaluate_expression(
        "ctx.vehicle.mileage > 100000 && fields.vin.valid",
        context,
    )
    .expect("should evaluate");
    assert_eq!(rust(result), json!({ "success": true, "value": true }));
}

#[wasm_bindgen_test]
fn test_evaluate_error_fails_closed() {
    let result = formexpr_wasm::evaluate_expression("unknown(ctx.value)", JsValue::UNDEFINED)
        .expect("should return a result object");
    let result = rust(result);
    assert_eq!(result["success"], json!(false));
    assert_eq!(result["value"], json!(false));
    assert!(result["error"].as_str().unwrap().contains("Unknown function"));
}

#[wasm_bindgen_test]
fn test_bad_context_fails_closed() {
    let result = formexpr_wasm::evaluate_expression("true", js(json!({ "fields": 5 })))
        .expect("should return a result object");
    let result = rust(result);
    assert_eq!(result["success"], json!(false));
    assert_eq!(result["value"], json!(false));
}

#[wasm_bindgen_test]
fn test_validate_expression() {
    let valid = formexpr_wasm::validate_expression("").expect("should validate");
    assert_eq!(rust(valid), json!({ "valid": true }));

    let invalid = formexpr_wasm::validate_expression("ctx.a == 'x").expect("should validate");
    assert!(rust(invalid)["error"].as_str().unwrap().contains("Unterminated"));
}

#[wasm_bindgen_test]
fn test_get_dependencies() {
    let deps = formexpr_wasm::get_dependencies(
        "ctx.vehicle.mileage > 100000 && ctx.vehicle.mileage < 200000",
    )
    .expect("should extract");
    assert_eq!(rust(deps), json!(["ctx.vehicle.mileage"]));
}
