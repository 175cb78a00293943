pub mod context;
pub mod result;

pub use context::{ExpressionContext, FieldMap, FieldState};
pub use result::{EvaluationResult, ValidationResult};
