//! Defines the registry and built-in implementations for rule functions.
//!
//! The table is closed: only the built-ins registered in [`FunctionRegistry::default`]
//! can be called. Names are case-sensitive. Missing arguments are treated as
//! undefined and extra arguments are ignored.

use crate::operators::strict_equals;
use crate::value::ExprValue;
use serde_json::Value;
use std::collections::HashMap;

/// The signature of a built-in function.
pub type BuiltinFunction = for<'a, 'b> fn(&'b [ExprValue<'a>]) -> ExprValue<'static>;

/// Maps function names to implementations. Aliases share one implementation.
#[derive(Clone)]
pub struct FunctionRegistry {
    functions: HashMap<&'static str, BuiltinFunction>,
}

impl FunctionRegistry {
    fn new() -> Self {
        Self {
            functions: HashMap::new(),
        }
    }

    fn register(&mut self, name: &'static str, func: BuiltinFunction) {
        self.functions.insert(name, func);
    }

    pub fn get(&self, name: &str) -> Option<BuiltinFunction> {
        self.functions.get(name).copied()
    }
}

impl Default for FunctionRegistry {
    /// Creates a registry populated with all built-in functions.
    fn default() -> Self {
        let mut registry = Self::new();
        registry.register("empty", func_empty);
        registry.register("present", func_present);
        registry.register("has", func_has);
        registry.register("in", func_in);
        registry.register("oneOf", func_in);
        registry.register("length", func_length);
        registry
    }
}

impl std::fmt::Debug for FunctionRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names: Vec<_> = self.functions.keys().collect();
        names.sort();
        f.debug_struct("FunctionRegistry").field("functions", &names).finish()
    }
}

/// `undefined`, `null`, `""` and `[]` are empty.
fn is_empty(value: Option<&ExprValue<'_>>) -> bool {
    match value.and_then(ExprValue::as_json) {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.is_empty(),
        Some(Value::Array(items)) => items.is_empty(),
        Some(_) => false,
    }
}

// --- Built-in Function Implementations ---

fn func_empty(args: &[ExprValue<'_>]) -> ExprValue<'static> {
    is_empty(args.first()).into()
}

fn func_present(args: &[ExprValue<'_>]) -> ExprValue<'static> {
    (!is_empty(args.first())).into()
}

fn func_has(args: &[ExprValue<'_>]) -> ExprValue<'static> {
    args.first().is_some_and(|v| !v.is_nullish()).into()
}

fn func_in(args: &[ExprValue<'_>]) -> ExprValue<'static> {
    let needle = args.first().cloned().unwrap_or_default();
    let found = match args.get(1).and_then(ExprValue::as_json) {
        Some(Value::Array(items)) => items
            .iter()
            .any(|item| strict_equals(&needle, &ExprValue::borrowed(item))),
        _ => false,
    };
    found.into()
}

fn func_length(args: &[ExprValue<'_>]) -> ExprValue<'static> {
    match args.first().and_then(ExprValue::as_json) {
        Some(Value::String(s)) => ExprValue::owned(s.chars().count()),
        Some(Value::Array(items)) => ExprValue::owned(items.len()),
        _ => ExprValue::Undefined,
    }
}
