//! A `nom`-based tokenizer for rule expressions.
//!
//! Dotted identifier chains such as `ctx.vehicle.mileage` are emitted as a
//! single [`TokenKind::Ident`] so later stages always see whole paths.

use crate::error::ExprError;
use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::{tag, take_while, take_while1},
    character::complete::{char, digit1, one_of, satisfy},
    combinator::{map, opt, recognize, value},
    error::{ErrorKind, ParseError},
    multi::many0,
    sequence::pair,
};
use serde_json::Number;
use std::fmt;

/// Comparison and logical operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    And,
    Or,
    Not,
    LooseEq,
    LooseNotEq,
    StrictEq,
    StrictNotEq,
    Greater,
    Less,
    GreaterEq,
    LessEq,
}

impl Operator {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::And => "&&",
            Operator::Or => "||",
            Operator::Not => "!",
            Operator::LooseEq => "==",
            Operator::LooseNotEq => "!=",
            Operator::StrictEq => "===",
            Operator::StrictNotEq => "!==",
            Operator::Greater => ">",
            Operator::Less => "<",
            Operator::GreaterEq => ">=",
            Operator::LessEq => "<=",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    Number(Number),
    String(String),
    Boolean(bool),
    Null,
    /// An identifier or a whole dotted path.
    Ident(String),
    Operator(Operator),
    Dot,
    Comma,
    LParen,
    RParen,
    Eof,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Number(n) => write!(f, "{}", n),
            TokenKind::String(s) => write!(f, "\"{}\"", s),
            TokenKind::Boolean(b) => write!(f, "{}", b),
            TokenKind::Null => f.write_str("null"),
            TokenKind::Ident(name) => f.write_str(name),
            TokenKind::Operator(op) => f.write_str(op.as_str()),
            TokenKind::Dot => f.write_str("."),
            TokenKind::Comma => f.write_str(","),
            TokenKind::LParen => f.write_str("("),
            TokenKind::RParen => f.write_str(")"),
            TokenKind::Eof => f.write_str("end of expression"),
        }
    }
}

/// A token and the byte offset where it starts.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub position: usize,
}

impl Token {
    pub fn new(kind: TokenKind, position: usize) -> Self {
        Self { kind, position }
    }
}

// --- Main Public Tokenizer ---

/// Splits `source` into tokens. The returned list always ends with [`TokenKind::Eof`].
pub fn tokenize(source: &str) -> Result<Vec<Token>, ExprError> {
    let mut tokens = Vec::new();
    let mut rest = source;

    loop {
        rest = rest.trim_start();
        let position = offset(source, rest);
        let Some(first) = rest.chars().next() else {
            tokens.push(Token::new(TokenKind::Eof, position));
            return Ok(tokens);
        };

        match token(rest) {
            Ok((remaining, kind)) => {
                tokens.push(Token::new(kind, position));
                rest = remaining;
            }
            Err(nom::Err::Failure(LexFailure::Unterminated { at })) => {
                return Err(ExprError::UnterminatedString {
                    position: offset(source, at),
                });
            }
            Err(nom::Err::Failure(LexFailure::InvalidNumber { literal, at })) => {
                return Err(ExprError::InvalidNumber {
                    literal: literal.to_string(),
                    position: offset(source, at),
                });
            }
            Err(_) => {
                return Err(ExprError::UnexpectedCharacter {
                    character: first,
                    position,
                });
            }
        }
    }
}

fn offset(source: &str, rest: &str) -> usize {
    source.len() - rest.len()
}

// --- Error Type ---

#[derive(Debug, Clone, PartialEq)]
enum LexFailure<'a> {
    Unterminated { at: &'a str },
    InvalidNumber { literal: &'a str, at: &'a str },
    Unmatched,
}

impl<'a> ParseError<&'a str> for LexFailure<'a> {
    fn from_error_kind(_input: &'a str, _kind: ErrorKind) -> Self {
        LexFailure::Unmatched
    }

    fn append(_input: &'a str, _kind: ErrorKind, other: Self) -> Self {
        other
    }
}

type LexResult<'a, O> = IResult<&'a str, O, LexFailure<'a>>;

// --- Combinators ---

fn token(input: &str) -> LexResult<'_, TokenKind> {
    alt((
        number,
        map(string_literal, TokenKind::String),
        map(operator, TokenKind::Operator),
        word,
        punctuation,
    ))
    .parse(input)
}

fn operator(input: &str) -> LexResult<'_, Operator> {
    // Longest operators first so `===` is not read as `==` followed by `=`.
    alt((
        value(Operator::StrictEq, tag("===")),
        value(Operator::StrictNotEq, tag("!==")),
        value(Operator::LooseEq, tag("==")),
        value(Operator::LooseNotEq, tag("!=")),
        value(Operator::GreaterEq, tag(">=")),
        value(Operator::LessEq, tag("<=")),
        value(Operator::And, tag("&&")),
        value(Operator::Or, tag("||")),
        value(Operator::Greater, char('>')),
        value(Operator::Less, char('<')),
        value(Operator::Not, char('!')),
    ))
    .parse(input)
}

fn punctuation(input: &str) -> LexResult<'_, TokenKind> {
    alt((
        value(TokenKind::Dot, char('.')),
        value(TokenKind::Comma, char(',')),
        value(TokenKind::LParen, char('(')),
        value(TokenKind::RParen, char(')')),
    ))
    .parse(input)
}

// --- Literal Parsers ---

fn number(input: &str) -> LexResult<'_, TokenKind> {
    let (rest, literal) = recognize(pair(
        opt(char('-')),
        pair(digit1, opt(pair(char('.'), digit1))),
    ))
    .parse(input)?;

    match json_number(literal) {
        Some(n) => Ok((rest, TokenKind::Number(n))),
        None => Err(nom::Err::Failure(LexFailure::InvalidNumber { literal, at: input })),
    }
}

fn json_number(literal: &str) -> Option<Number> {
    if !literal.contains('.') {
        if let Ok(i) = literal.parse::<i64>() {
            return Some(Number::from(i));
        }
    }
    literal.parse::<f64>().ok().and_then(Number::from_f64)
}

/// Parses a single- or double-quoted string, resolving backslash escapes.
fn string_literal(input: &str) -> LexResult<'_, String> {
    let (body, quote) = one_of("\"'").parse(input)?;
    let mut text = String::new();
    let mut chars = body.char_indices();

    while let Some((idx, c)) = chars.next() {
        match c {
            '\\' => match chars.next() {
                Some((_, 'n')) => text.push('\n'),
                Some((_, 't')) => text.push('\t'),
                Some((_, 'r')) => text.push('\r'),
                Some((_, escaped)) => text.push(escaped),
                None => break,
            },
            c if c == quote => return Ok((&body[idx + c.len_utf8()..], text)),
            c => text.push(c),
        }
    }

    Err(nom::Err::Failure(LexFailure::Unterminated { at: input }))
}

// --- Identifier / Path Parser ---

fn is_ident_start(c: char) -> bool {
    c.is_alphabetic() || c == '_' || c == '$'
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}

fn identifier(input: &str) -> LexResult<'_, &str> {
    recognize(pair(satisfy(is_ident_start), take_while(is_ident_char))).parse(input)
}

/// An identifier, optionally followed by `.segment` parts. Segments after the
/// first may start with a digit so array indexes like `items.0` stay in the path.
fn word(input: &str) -> LexResult<'_, TokenKind> {
    let (rest, text) = recognize(pair(
        identifier,
        many0(pair(char('.'), take_while1(is_ident_char))),
    ))
    .parse(input)?;

    let kind = match text {
        "true" => TokenKind::Boolean(true),
        "false" => TokenKind::Boolean(false),
        "null" => TokenKind::Null,
        _ => TokenKind::Ident(text.to_string()),
    };
    Ok((rest, kind))
}
