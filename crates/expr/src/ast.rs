//! Defines the Abstract Syntax Tree (AST) for rule expressions.
use serde_json::Value;

/// The top-level expression that can be evaluated.
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    /// A string, number, boolean or null literal.
    Literal(Value),
    /// A whole dotted path, e.g. `ctx.vehicle.mileage`.
    Path(String),
    Unary {
        op: UnaryOperator,
        expr: Box<Expression>,
    },
    /// A comparison.
    Binary {
        left: Box<Expression>,
        op: BinaryOperator,
        right: Box<Expression>,
    },
    Logical {
        left: Box<Expression>,
        op: LogicalOperator,
        right: Box<Expression>,
    },
    FunctionCall {
        name: String,
        args: Vec<Expression>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOperator {
    Not,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    // Equality
    LooseEquals,
    LooseNotEquals,
    StrictEquals,
    StrictNotEquals,
    // Relational
    GreaterThan,
    LessThan,
    GreaterThanOrEqual,
    LessThanOrEqual,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicalOperator {
    And,
    Or,
}

impl Expression {
    /// The expression used for empty source text.
    pub fn always_true() -> Self {
        Expression::Literal(Value::Bool(true))
    }

    /// Visits this node and every descendant in pre-order, left to right.
    pub fn walk<'a, F>(&'a self, visit: &mut F)
    where
        F: FnMut(&'a Expression),
    {
        visit(self);
        match self {
            Expression::Literal(_) | Expression::Path(_) => {}
            Expression::Unary { expr, .. } => expr.walk(visit),
            Expression::Binary { left, right, .. } | Expression::Logical { left, right, .. } => {
                left.walk(visit);
                right.walk(visit);
            }
            Expression::FunctionCall { args, .. } => {
                for arg in args {
                    arg.walk(visit);
                }
            }
        }
    }
}
