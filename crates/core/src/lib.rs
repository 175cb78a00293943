//! # formexpr-core
//!
//! Integration layer for rule expressions.
//!
//! - **engine**: [`ExpressionEngine`], which parses (with an AST cache),
//!   evaluates fail-closed, validates and extracts dependencies
//! - **config**: [`EngineConfig`] tuning knobs
//! - **cache**: the thread-safe [`ExpressionCache`]
//!
//! The free functions [`evaluate_expression`], [`validate_expression`] and
//! [`get_dependencies`] use a process-wide engine with the default
//! configuration.

// Re-export foundation and algorithm crates
pub use formexpr_expr as expr;
pub use formexpr_types as types;

pub mod cache;
pub mod config;
pub mod engine;

pub use cache::ExpressionCache;
pub use config::EngineConfig;
pub use engine::ExpressionEngine;
pub use formexpr_types::{EvaluationResult, ExpressionContext, FieldState, ValidationResult};

use once_cell::sync::Lazy;

static DEFAULT_ENGINE: Lazy<ExpressionEngine> = Lazy::new(ExpressionEngine::default);

/// The shared engine behind the free functions.
pub fn default_engine() -> &'static ExpressionEngine {
    &DEFAULT_ENGINE
}

/// Evaluates `source` against `context`. Errors yield
/// `{ success: false, value: false, error }`.
pub fn evaluate_expression(source: &str, context: &ExpressionContext) -> EvaluationResult {
    DEFAULT_ENGINE.evaluate(source, context)
}

/// Checks that `source` is syntactically well formed. Empty source is valid.
pub fn validate_expression(source: &str) -> ValidationResult {
    DEFAULT_ENGINE.validate(source)
}

/// The sorted, deduplicated `ctx.*`/`fields.*` paths `source` reads, or an
/// empty list if it does not parse.
pub fn get_dependencies(source: &str) -> Vec<String> {
    DEFAULT_ENGINE.dependencies(source)
}
