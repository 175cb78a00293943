//! A recursive-descent parser over the token stream produced by [`crate::lexer`].
//!
//! Precedence, lowest to highest: `||`, `&&`, equality, relational, unary `!`,
//! primary. Function names are not checked here; any `IDENT(...)` is accepted.

use crate::ast::*;
use crate::error::ExprError;
use crate::lexer::{Operator, Token, TokenKind, tokenize};
use serde_json::Value;

/// Default limit for source nesting and for the height of the parsed tree.
pub const DEFAULT_MAX_DEPTH: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Maximum nesting of parentheses, calls and `!`, and maximum height of
    /// the resulting tree. Chained operators add one level per operator, so a
    /// flat `a && b && c` has height 3. Exceeding either fails with
    /// [`ExprError::TooDeep`].
    pub max_depth: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

const OR_OPS: &[(Operator, LogicalOperator)] = &[(Operator::Or, LogicalOperator::Or)];
const AND_OPS: &[(Operator, LogicalOperator)] = &[(Operator::And, LogicalOperator::And)];

const EQUALITY_OPS: &[(Operator, BinaryOperator)] = &[
    (Operator::LooseEq, BinaryOperator::LooseEquals),
    (Operator::LooseNotEq, BinaryOperator::LooseNotEquals),
    (Operator::StrictEq, BinaryOperator::StrictEquals),
    (Operator::StrictNotEq, BinaryOperator::StrictNotEquals),
];

const RELATIONAL_OPS: &[(Operator, BinaryOperator)] = &[
    (Operator::Greater, BinaryOperator::GreaterThan),
    (Operator::Less, BinaryOperator::LessThan),
    (Operator::GreaterEq, BinaryOperator::GreaterThanOrEqual),
    (Operator::LessEq, BinaryOperator::LessThanOrEqual),
];

// --- Main Public Parser ---

pub fn parse_expression(source: &str) -> Result<Expression, ExprError> {
    parse_expression_with(source, ParseOptions::default())
}

/// Parses `source` into an AST. Empty or whitespace-only source is the literal `true`.
pub fn parse_expression_with(source: &str, options: ParseOptions) -> Result<Expression, ExprError> {
    if source.trim().is_empty() {
        return Ok(Expression::always_true());
    }

    let tokens = tokenize(source)?;
    let mut parser = Parser::new(&tokens, options.max_depth);
    let (expr, _) = parser.expression()?;

    let next = parser.peek();
    if next.kind != TokenKind::Eof {
        return Err(ExprError::syntax(
            format!("Unexpected token '{}' after end of expression", next.kind),
            next.position,
        ));
    }
    Ok(expr)
}

// --- Parser State ---

/// A parsed expression and the height of its tree.
type Parsed = (Expression, usize);

struct Parser<'t> {
    /// Always terminated by an `Eof` token.
    tokens: &'t [Token],
    pos: usize,
    depth: usize,
    max_depth: usize,
}

impl<'t> Parser<'t> {
    fn new(tokens: &'t [Token], max_depth: usize) -> Self {
        Self {
            tokens,
            pos: 0,
            depth: 0,
            max_depth,
        }
    }

    fn peek(&self) -> &'t Token {
        &self.tokens[self.pos]
    }

    /// Returns the current token and moves past it. Never moves past `Eof`.
    fn advance(&mut self) -> &'t Token {
        let token = self.peek();
        if token.kind != TokenKind::Eof {
            self.pos += 1;
        }
        token
    }

    fn eat(&mut self, kind: &TokenKind) -> bool {
        if &self.peek().kind == kind {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: &TokenKind, expected: &str) -> Result<(), ExprError> {
        let token = self.peek();
        if &token.kind == kind {
            self.advance();
            return Ok(());
        }
        let message = match token.kind {
            TokenKind::Eof => format!("Expected {} but reached end of expression", expected),
            ref found => format!("Expected {} but found '{}'", expected, found),
        };
        Err(ExprError::syntax(message, token.position))
    }

    fn match_operator<T: Copy>(&mut self, table: &[(Operator, T)]) -> Option<T> {
        let TokenKind::Operator(found) = self.peek().kind else {
            return None;
        };
        let (_, mapped) = table.iter().find(|(op, _)| *op == found)?;
        self.advance();
        Some(*mapped)
    }

    // --- Expression Parsers (in order of precedence) ---
    //
    // Each parser returns the expression with its tree height. Source nesting
    // (`depth`) and tree height are both bounded by `max_depth`.

    fn expression(&mut self) -> Result<Parsed, ExprError> {
        self.or_expr()
    }

    fn or_expr(&mut self) -> Result<Parsed, ExprError> {
        self.logical_chain(Self::and_expr, OR_OPS)
    }

    fn and_expr(&mut self) -> Result<Parsed, ExprError> {
        self.logical_chain(Self::equality_expr, AND_OPS)
    }

    fn equality_expr(&mut self) -> Result<Parsed, ExprError> {
        self.comparison_chain(Self::relational_expr, EQUALITY_OPS)
    }

    fn relational_expr(&mut self) -> Result<Parsed, ExprError> {
        self.comparison_chain(Self::unary_expr, RELATIONAL_OPS)
    }

    fn too_deep(&self, position: usize) -> ExprError {
        ExprError::TooDeep {
            max_depth: self.max_depth,
            position,
        }
    }

    /// The height of a node over children of height `child_height`.
    fn grow(&self, child_height: usize, position: usize) -> Result<usize, ExprError> {
        let height = child_height + 1;
        if height > self.max_depth {
            return Err(self.too_deep(position));
        }
        Ok(height)
    }

    fn logical_chain(
        &mut self,
        operand: fn(&mut Self) -> Result<Parsed, ExprError>,
        table: &[(Operator, LogicalOperator)],
    ) -> Result<Parsed, ExprError> {
        let (mut left, mut height) = operand(self)?;
        loop {
            let position = self.peek().position;
            let Some(op) = self.match_operator(table) else {
                break;
            };
            let (right, right_height) = operand(self)?;
            height = self.grow(height.max(right_height), position)?;
            left = Expression::Logical {
                left: Box::new(left),
                op,
                right: Box::new(right),
            };
        }
        Ok((left, height))
    }

    fn comparison_chain(
        &mut self,
        operand: fn(&mut Self) -> Result<Parsed, ExprError>,
        table: &[(Operator, BinaryOperator)],
    ) -> Result<Parsed, ExprError> {
        let (mut left, mut height) = operand(self)?;
        loop {
            let position = self.peek().position;
            let Some(op) = self.match_operator(table) else {
                break;
            };
            let (right, right_height) = operand(self)?;
            height = self.grow(height.max(right_height), position)?;
            left = Expression::Binary {
                left: Box::new(left),
                op,
                right: Box::new(right),
            };
        }
        Ok((left, height))
    }

    fn unary_expr(&mut self) -> Result<Parsed, ExprError> {
        let token = self.peek();
        self.depth += 1;
        if self.depth > self.max_depth {
            return Err(self.too_deep(token.position));
        }

        let result = if token.kind == TokenKind::Operator(Operator::Not) {
            self.advance();
            self.unary_expr().and_then(|(expr, height)| {
                let height = self.grow(height, token.position)?;
                let expr = Expression::Unary {
                    op: UnaryOperator::Not,
                    expr: Box::new(expr),
                };
                Ok((expr, height))
            })
        } else {
            self.primary_expr()
        };

        self.depth -= 1;
        result
    }

    fn primary_expr(&mut self) -> Result<Parsed, ExprError> {
        let token = self.advance();
        let leaf = |expr: Expression| -> Result<Parsed, ExprError> { Ok((expr, 1)) };
        match &token.kind {
            TokenKind::Number(n) => leaf(Expression::Literal(Value::Number(n.clone()))),
            TokenKind::String(s) => leaf(Expression::Literal(Value::String(s.clone()))),
            TokenKind::Boolean(b) => leaf(Expression::Literal(Value::Bool(*b))),
            TokenKind::Null => leaf(Expression::Literal(Value::Null)),
            TokenKind::Ident(name) => {
                // An identifier followed by `(` is always a call, never a path.
                if self.eat(&TokenKind::LParen) {
                    let (args, args_height) = self.arguments()?;
                    let height = self.grow(args_height, token.position)?;
                    let call = Expression::FunctionCall {
                        name: name.clone(),
                        args,
                    };
                    Ok((call, height))
                } else {
                    leaf(Expression::Path(name.clone()))
                }
            }
            TokenKind::LParen => {
                let parsed = self.expression()?;
                self.expect(&TokenKind::RParen, "')'")?;
                Ok(parsed)
            }
            TokenKind::Eof => Err(ExprError::syntax(
                "Unexpected end of expression",
                token.position,
            )),
            other => Err(ExprError::syntax(
                format!("Unexpected token '{}'", other),
                token.position,
            )),
        }
    }

    /// Parses call arguments after the opening parenthesis. Returns them with
    /// the height of the tallest one.
    fn arguments(&mut self) -> Result<(Vec<Expression>, usize), ExprError> {
        let mut args = Vec::new();
        let mut height = 0;
        if self.eat(&TokenKind::RParen) {
            return Ok((args, height));
        }
        loop {
            let (arg, arg_height) = self.expression()?;
            args.push(arg);
            height = height.max(arg_height);
            if self.eat(&TokenKind::Comma) {
                continue;
            }
            self.expect(&TokenKind::RParen, "',' or ')'")?;
            return Ok((args, height));
        }
    }
}
