//! The evaluation engine for executing a parsed AST against an [`ExpressionContext`].

use crate::ast::{Expression, LogicalOperator, UnaryOperator};
use crate::error::ExprError;
use crate::functions::FunctionRegistry;
use crate::operators;
use crate::value::ExprValue;
use formexpr_types::ExpressionContext;
use std::str::Split;

/// Everything needed during expression evaluation.
/// `'d` is the lifetime of the context data and the function table.
#[derive(Debug, Clone, Copy)]
pub struct EvaluationContext<'d> {
    pub data: &'d ExpressionContext,
    pub functions: &'d FunctionRegistry,
}

impl<'d> EvaluationContext<'d> {
    pub fn new(data: &'d ExpressionContext, functions: &'d FunctionRegistry) -> Self {
        Self { data, functions }
    }
}

/// Evaluates a parsed expression.
///
/// `&&` and `||` short-circuit and yield the operand that decided the result.
/// The only evaluation-time error is a call to a function outside the table.
pub fn evaluate<'a>(
    expr: &'a Expression,
    e_ctx: &EvaluationContext<'a>,
) -> Result<ExprValue<'a>, ExprError> {
    match expr {
        Expression::Literal(value) => Ok(ExprValue::borrowed(value)),
        Expression::Path(path) => Ok(resolve_path(path, e_ctx.data)),
        Expression::Unary { op, expr } => {
            let val = evaluate(expr, e_ctx)?;
            match op {
                UnaryOperator::Not => Ok((!val.is_truthy()).into()),
            }
        }
        Expression::Binary { left, op, right } => {
            let left_val = evaluate(left, e_ctx)?;
            let right_val = evaluate(right, e_ctx)?;
            Ok(operators::evaluate(*op, &left_val, &right_val).into())
        }
        Expression::Logical { left, op, right } => {
            let left_val = evaluate(left, e_ctx)?;
            match (op, left_val.is_truthy()) {
                (LogicalOperator::And, false) | (LogicalOperator::Or, true) => Ok(left_val),
                _ => evaluate(right, e_ctx),
            }
        }
        Expression::FunctionCall { name, args } => {
            let func = e_ctx
                .functions
                .get(name)
                .ok_or_else(|| ExprError::UnknownFunction(name.clone()))?;
            let mut evaluated_args = Vec::with_capacity(args.len());
            for arg in args {
                evaluated_args.push(evaluate(arg, e_ctx)?);
            }
            Ok(func(&evaluated_args))
        }
    }
}

/// Resolves a dotted path against the context. Never fails: anything that
/// cannot be reached is undefined.
///
/// - `ctx.a.b` walks the `ctx` tree.
/// - `fields.name` is the field record; `fields.name.value|valid|error|<meta>`
///   selects a member, and further segments walk into it.
/// - Any other root is undefined.
pub fn resolve_path<'a>(path: &str, data: &'a ExpressionContext) -> ExprValue<'a> {
    let mut segments = path.split('.');
    let start = match segments.next() {
        Some("ctx") => ExprValue::borrowed(&data.ctx),
        Some("fields") => resolve_field(&mut segments, data),
        _ => ExprValue::Undefined,
    };
    segments.fold(start, ExprValue::member)
}

fn resolve_field<'a>(segments: &mut Split<'_, char>, data: &'a ExpressionContext) -> ExprValue<'a> {
    let Some(name) = segments.next() else {
        return ExprValue::owned(data.fields_json());
    };
    let Some(field) = data.fields.get(name) else {
        return ExprValue::Undefined;
    };
    match segments.next() {
        None => ExprValue::owned(field.to_json()),
        Some(member) => field
            .member(member)
            .map(ExprValue::Json)
            .unwrap_or_default(),
    }
}
