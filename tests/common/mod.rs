pub mod fixtures;

use formexpr::{EngineConfig, EvaluationResult, ExpressionContext, ExpressionEngine, evaluate_expression};
use serde_json::Value;

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

/// Builds a context from a JSON object with `ctx` and `fields` members.
pub fn context_from(value: Value) -> ExpressionContext {
    serde_json::from_value(value).expect("fixture should deserialize into a context")
}

/// Evaluates with the shared engine and with a fresh engine without a
/// cache, and checks both agree.
pub fn evaluate(source: &str, context: &ExpressionContext) -> EvaluationResult {
    let shared = evaluate_expression(source, context);
    let uncached = ExpressionEngine::new(EngineConfig::default().with_cache_capacity(0))
        .evaluate(source, context);
    assert_eq!(shared, uncached, "cached and uncached results differ for {}", source);
    shared
}

/// Asserts that `source` evaluates successfully to `expected`.
pub fn assert_value(source: &str, context: &ExpressionContext, expected: Value) {
    let result = evaluate(source, context);
    assert!(result.success, "{} failed: {:?}", source, result.error);
    assert_eq!(result.value, Some(expected), "unexpected value for {}", source);
}

/// Asserts that `source` fails closed with an error containing `needle`.
pub fn assert_failure(source: &str, context: &ExpressionContext, needle: &str) {
    let result = evaluate(source, context);
    assert!(!result.success, "{} should have failed", source);
    assert_eq!(result.value, Some(Value::Bool(false)));
    let error = result.error.unwrap_or_default();
    assert!(!error.is_empty(), "empty error for {}", source);
    assert!(
        error.contains(needle),
        "error for {} was {:?}, expected it to contain {:?}",
        source,
        error,
        needle
    );
}
