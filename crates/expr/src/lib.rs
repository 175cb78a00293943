//! Rule expressions for form field definitions.
//!
//! Small boolean/value expressions such as
//! `ctx.vehicle.mileage > 100000 && fields.vin.valid` are tokenized, parsed
//! into an immutable AST, evaluated against an [`ExpressionContext`], and
//! scanned for the context paths they depend on.
//!
//! # Example
//!
//! ```
//! use formexpr_expr::{EvaluationContext, ExpressionContext, FunctionRegistry, evaluate, parse_expression};
//! use serde_json::json;
//!
//! let expr = parse_expression("ctx.count > 2 && present(ctx.name)").unwrap();
//! let data = ExpressionContext::new(json!({ "count": 3, "name": "Ada" }));
//! let functions = FunctionRegistry::default();
//! let value = evaluate(&expr, &EvaluationContext::new(&data, &functions)).unwrap();
//! assert!(value.is_truthy());
//! ```

pub mod ast;
pub mod dependencies;
pub mod engine;
pub mod error;
pub mod functions;
pub mod lexer;
pub mod operators;
pub mod parser;
pub mod value;

pub use ast::{BinaryOperator, Expression, LogicalOperator, UnaryOperator};
pub use dependencies::dependencies;
pub use engine::{EvaluationContext, evaluate, resolve_path};
pub use error::{ErrorKind, ExprError};
pub use functions::{BuiltinFunction, FunctionRegistry};
pub use lexer::{Token, TokenKind, tokenize};
pub use parser::{DEFAULT_MAX_DEPTH, ParseOptions, parse_expression, parse_expression_with};
pub use value::ExprValue;

pub use formexpr_types::{ExpressionContext, FieldState};
