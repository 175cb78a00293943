//! # formexpr
//!
//! Safe, sandboxed rule expressions for dynamic form visibility and
//! validation. Expressions are parsed and walked by a tree evaluator; there
//! is no host-language `eval`, and only a closed set of built-in functions
//! can be called.
//!
//! ```
//! use formexpr::{ExpressionContext, FieldState, evaluate_expression, get_dependencies};
//! use serde_json::json;
//!
//! let context = ExpressionContext::new(json!({ "vehicle": { "mileage": 150000 } }))
//!     .with_field("vin", FieldState::new("YV1LZ", true));
//!
//! let result = evaluate_expression("ctx.vehicle.mileage > 100000 && fields.vin.valid", &context);
//! assert!(result.success);
//! assert_eq!(result.value, Some(json!(true)));
//!
//! assert_eq!(
//!     get_dependencies("fields.vin.valid && ctx.vehicle.mileage > 100000"),
//!     vec!["ctx.vehicle.mileage", "fields.vin.valid"]
//! );
//! ```

pub mod error;

pub use error::CliError;
pub use formexpr_core::{
    EngineConfig, EvaluationResult, ExpressionCache, ExpressionContext, ExpressionEngine,
    FieldState, ValidationResult, default_engine, evaluate_expression, get_dependencies,
    validate_expression,
};
pub use formexpr_expr::{ErrorKind, ExprError, Expression, ParseOptions, parse_expression};
pub use formexpr_types::FieldMap;
