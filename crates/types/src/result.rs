//! Outcomes returned by the public API.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The outcome of evaluating an expression.
///
/// `success` reports whether evaluation completed, not whether the result is
/// boolean. A failed evaluation always carries `value: false` so callers that
/// gate visibility on it stay closed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationResult {
    pub success: bool,
    /// `None` when the expression evaluated to an undefined path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl EvaluationResult {
    pub fn success(value: Option<Value>) -> Self {
        Self {
            success: true,
            value,
            error: None,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            value: Some(Value::Bool(false)),
            error: Some(error.into()),
        }
    }
}

/// The outcome of a syntax-only check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub valid: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ValidationResult {
    pub fn valid() -> Self {
        Self {
            valid: true,
            error: None,
        }
    }

    pub fn invalid(error: impl Into<String>) -> Self {
        Self {
            valid: false,
            error: Some(error.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_failure_is_closed() {
        let result = EvaluationResult::failure("boom");
        assert!(!result.success);
        assert_eq!(result.value, Some(json!(false)));
        assert_eq!(result.error.as_deref(), Some("boom"));
    }

    #[test]
    fn test_serialized_shape_omits_absent_members() {
        let ok = serde_json::to_value(EvaluationResult::success(Some(json!(true)))).unwrap();
        assert_eq!(ok, json!({ "success": true, "value": true }));

        let undefined = serde_json::to_value(EvaluationResult::success(None)).unwrap();
        assert_eq!(undefined, json!({ "success": true }));

        let valid = serde_json::to_value(ValidationResult::valid()).unwrap();
        assert_eq!(valid, json!({ "valid": true }));
    }
}
