//! Comparison semantics for rule expressions.
//!
//! Equality and ordering follow the coercion rules form authors expect from
//! JavaScript: `==` coerces, `===` does not, and relational operators compare
//! strings lexicographically and everything else numerically.

use crate::ast::BinaryOperator;
use crate::value::ExprValue;
use serde_json::Value;
use std::cmp::Ordering;

pub fn evaluate(op: BinaryOperator, left: &ExprValue<'_>, right: &ExprValue<'_>) -> bool {
    match op {
        BinaryOperator::LooseEquals => loose_equals(left, right),
        BinaryOperator::LooseNotEquals => !loose_equals(left, right),
        BinaryOperator::StrictEquals => strict_equals(left, right),
        BinaryOperator::StrictNotEquals => !strict_equals(left, right),
        BinaryOperator::GreaterThan => compare(left, right, |ord| ord == Ordering::Greater),
        BinaryOperator::LessThan => compare(left, right, |ord| ord == Ordering::Less),
        BinaryOperator::GreaterThanOrEqual => compare(left, right, |ord| ord != Ordering::Less),
        BinaryOperator::LessThanOrEqual => compare(left, right, |ord| ord != Ordering::Greater),
    }
}

// --- Equality ---

/// Type-sensitive equality. Numbers compare by value, so `1 === 1.0`.
/// Arrays and objects compare structurally.
pub fn strict_equals(left: &ExprValue<'_>, right: &ExprValue<'_>) -> bool {
    match (left.as_json(), right.as_json()) {
        (None, None) => true,
        (Some(l), Some(r)) => json_strict_equals(l, r),
        _ => false,
    }
}

fn json_strict_equals(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Number(l), Value::Number(r)) => match (l.as_f64(), r.as_f64()) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        },
        (Value::Array(l), Value::Array(r)) => {
            l.len() == r.len() && l.iter().zip(r).all(|(a, b)| json_strict_equals(a, b))
        }
        (Value::Object(l), Value::Object(r)) => {
            l.len() == r.len()
                && l
                    .iter()
                    .all(|(k, v)| r.get(k).is_some_and(|other| json_strict_equals(v, other)))
        }
        _ => left == right,
    }
}

/// Coercing equality: `null == undefined`, numbers, strings and booleans are
/// compared numerically when their types differ, and arrays/objects compared
/// with a primitive are first converted to their string form.
pub fn loose_equals(left: &ExprValue<'_>, right: &ExprValue<'_>) -> bool {
    if left.is_nullish() || right.is_nullish() {
        return left.is_nullish() && right.is_nullish();
    }
    match (left.as_json(), right.as_json()) {
        (Some(l), Some(r)) => json_loose_equals(l, r),
        _ => false,
    }
}

fn json_loose_equals(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Null, Value::Null) => true,
        (Value::Null, _) | (_, Value::Null) => false,
        (Value::Bool(_), _) | (_, Value::Bool(_)) => {
            if std::mem::discriminant(left) == std::mem::discriminant(right) {
                return left == right;
            }
            number_equals(to_number(left), to_number(right))
        }
        (Value::Number(_), Value::String(_)) | (Value::String(_), Value::Number(_)) => {
            number_equals(to_number(left), to_number(right))
        }
        (Value::Array(_) | Value::Object(_), Value::Array(_) | Value::Object(_)) => {
            json_strict_equals(left, right)
        }
        (Value::Array(_) | Value::Object(_), primitive) | (primitive, Value::Array(_) | Value::Object(_)) => {
            let composite = if matches!(left, Value::Array(_) | Value::Object(_)) {
                left
            } else {
                right
            };
            json_loose_equals(&Value::String(to_display_string(composite)), primitive)
        }
        _ => json_strict_equals(left, right),
    }
}

fn number_equals(a: f64, b: f64) -> bool {
    !a.is_nan() && !b.is_nan() && a == b
}

// --- Ordering ---

/// Relational comparison. Two strings compare lexicographically; otherwise
/// both sides are converted to numbers and any `NaN` makes the result false.
pub fn compare<F>(left: &ExprValue<'_>, right: &ExprValue<'_>, accept: F) -> bool
where
    F: Fn(Ordering) -> bool,
{
    let left = to_primitive(left);
    let right = to_primitive(right);

    if let (Some(Value::String(l)), Some(Value::String(r))) = (&left, &right) {
        return accept(l.as_str().cmp(r.as_str()));
    }

    let l = left.as_ref().map_or(f64::NAN, to_number);
    let r = right.as_ref().map_or(f64::NAN, to_number);
    l.partial_cmp(&r).is_some_and(accept)
}

/// Arrays and objects become their string form; primitives are unchanged.
fn to_primitive(value: &ExprValue<'_>) -> Option<Value> {
    value.as_json().map(|v| match v {
        Value::Array(_) | Value::Object(_) => Value::String(to_display_string(v)),
        other => other.clone(),
    })
}

// --- Conversions ---

/// Numeric conversion: `null` is 0, booleans are 0/1, strings are parsed
/// (blank strings are 0), and composites go through their string form.
pub fn to_number(value: &Value) -> f64 {
    match value {
        Value::Null => 0.0,
        Value::Bool(b) => {
            if *b {
                1.0
            } else {
                0.0
            }
        }
        Value::Number(n) => n.as_f64().unwrap_or(f64::NAN),
        Value::String(s) => parse_number(s),
        Value::Array(_) | Value::Object(_) => parse_number(&to_display_string(value)),
    }
}

fn parse_number(s: &str) -> f64 {
    let trimmed = s.trim();
    match trimmed {
        "" => 0.0,
        "Infinity" | "+Infinity" => f64::INFINITY,
        "-Infinity" => f64::NEG_INFINITY,
        _ if trimmed
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E')) =>
        {
            trimmed.parse().unwrap_or(f64::NAN)
        }
        _ => f64::NAN,
    }
}

/// String conversion used when a composite meets a primitive: array elements
/// are joined with commas (null elements become empty) and objects become
/// `[object Object]`.
pub fn to_display_string(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => format_number(n.as_f64().unwrap_or(f64::NAN)),
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::Null => String::new(),
                other => to_display_string(other),
            })
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => "[object Object]".to_string(),
    }
}

fn format_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        let sign = if n > 0.0 { "" } else { "-" };
        format!("{}Infinity", sign)
    } else if n == 0.0 {
        "0".to_string()
    } else if n.fract() == 0.0 && n.abs() < 1e21 {
        format!("{:.0}", n)
    } else {
        n.to_string()
    }
}
