use thiserror::Error;

/// Broad classification of an [`ExprError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The source could not be split into tokens.
    Lexical,
    /// The tokens do not form a valid expression.
    Syntax,
    /// The expression parsed but cannot be evaluated.
    Semantic,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExprError {
    #[error("Unterminated string literal starting at position {position}")]
    UnterminatedString { position: usize },

    #[error("Unexpected character '{character}' at position {position}")]
    UnexpectedCharacter { character: char, position: usize },

    #[error("Invalid number literal '{literal}' at position {position}")]
    InvalidNumber { literal: String, position: usize },

    #[error("Syntax error at position {position}: {message}")]
    Syntax { message: String, position: usize },

    #[error("Expression nesting exceeds the maximum depth of {max_depth} at position {position}")]
    TooDeep { max_depth: usize, position: usize },

    #[error("Unknown function: {0}")]
    UnknownFunction(String),
}

impl ExprError {
    pub fn syntax(message: impl Into<String>, position: usize) -> Self {
        Self::Syntax {
            message: message.into(),
            position,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ExprError::UnterminatedString { .. }
            | ExprError::UnexpectedCharacter { .. }
            | ExprError::InvalidNumber { .. } => ErrorKind::Lexical,
            ExprError::Syntax { .. } | ExprError::TooDeep { .. } => ErrorKind::Syntax,
            ExprError::UnknownFunction(_) => ErrorKind::Semantic,
        }
    }
}
