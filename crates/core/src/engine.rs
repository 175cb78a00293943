//! The [`ExpressionEngine`]: parse (with caching), evaluate fail-closed,
//! validate and extract dependencies.

use crate::cache::{Compiled, ExpressionCache};
use crate::config::EngineConfig;
use formexpr_expr::{
    EvaluationContext, ExprError, ExprValue, Expression, FunctionRegistry, dependencies, evaluate,
    parse_expression_with,
};
use formexpr_types::{EvaluationResult, ExpressionContext, ValidationResult};
use serde_json::Value;
use std::sync::Arc;

/// Evaluates rule expressions. Safe to share between threads.
#[derive(Debug)]
pub struct ExpressionEngine {
    config: EngineConfig,
    functions: FunctionRegistry,
    cache: Option<ExpressionCache>,
}

impl Default for ExpressionEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl ExpressionEngine {
    pub fn new(config: EngineConfig) -> Self {
        let cache = (config.cache_capacity > 0).then(|| ExpressionCache::new(config.cache_capacity));
        Self {
            config,
            functions: FunctionRegistry::default(),
            cache,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The AST cache, if caching is enabled.
    pub fn cache(&self) -> Option<&ExpressionCache> {
        self.cache.as_ref()
    }

    /// Parses `source`, reusing a cached AST when one exists.
    pub fn compile(&self, source: &str) -> Compiled {
        if let Some(hit) = self.cache.as_ref().and_then(|c| c.get(source)) {
            log::trace!("Expression cache hit for '{}'", source);
            return hit;
        }

        let compiled = parse_expression_with(source, self.config.parse_options()).map(Arc::new);
        if let Some(cache) = &self.cache {
            cache.insert(source, compiled.clone());
        }
        compiled
    }

    /// Evaluates `source` against `context`, surfacing errors.
    ///
    /// Returns `Ok(None)` when the expression evaluates to an undefined path.
    pub fn try_evaluate(
        &self,
        source: &str,
        context: &ExpressionContext,
    ) -> Result<Option<Value>, ExprError> {
        let expr = self.compile(source)?;
        self.evaluate_compiled(&expr, context)
    }

    pub fn evaluate_compiled(
        &self,
        expr: &Expression,
        context: &ExpressionContext,
    ) -> Result<Option<Value>, ExprError> {
        let e_ctx = EvaluationContext::new(context, &self.functions);
        evaluate(expr, &e_ctx).map(ExprValue::into_json)
    }

    /// Evaluates `source` against `context`.
    ///
    /// Any lexical, syntax or semantic error yields `success: false` with
    /// `value: false`, whatever type the expression was meant to produce.
    pub fn evaluate(&self, source: &str, context: &ExpressionContext) -> EvaluationResult {
        match self.try_evaluate(source, context) {
            Ok(value) => EvaluationResult::success(value),
            Err(e) => {
                log::debug!("{:?} error evaluating '{}': {}", e.kind(), source, e);
                EvaluationResult::failure(e.to_string())
            }
        }
    }

    /// Checks that `source` tokenizes and parses. Nothing is evaluated, so
    /// unknown function names are not reported here.
    pub fn validate(&self, source: &str) -> ValidationResult {
        match self.compile(source) {
            Ok(_) => ValidationResult::valid(),
            Err(e) => {
                log::debug!("{:?} error validating '{}': {}", e.kind(), source, e);
                ValidationResult::invalid(e.to_string())
            }
        }
    }

    /// The sorted, deduplicated `ctx.*`/`fields.*` paths `source` reads.
    /// Malformed source has no dependencies.
    pub fn dependencies(&self, source: &str) -> Vec<String> {
        match self.compile(source) {
            Ok(expr) => dependencies(&expr),
            Err(e) => {
                log::trace!("No dependencies for malformed expression '{}': {}", source, e);
                Vec::new()
            }
        }
    }
}
