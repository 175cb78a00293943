//! Collects the context paths an expression reads, for reactive re-evaluation.

use crate::ast::Expression;
use std::collections::BTreeSet;

/// Path prefixes that count as dependencies.
pub const DEPENDENCY_ROOTS: [&str; 2] = ["ctx.", "fields."];

fn is_dependency(path: &str) -> bool {
    DEPENDENCY_ROOTS.iter().any(|root| path.starts_with(root))
}

/// Every `ctx.*` / `fields.*` path referenced anywhere in `expr`, sorted
/// ascending and deduplicated.
pub fn dependencies(expr: &Expression) -> Vec<String> {
    let mut paths = BTreeSet::new();
    expr.walk(&mut |node| {
        if let Expression::Path(path) = node {
            if is_dependency(path) {
                paths.insert(path.as_str());
            }
        }
    });
    paths.into_iter().map(str::to_string).collect()
}
