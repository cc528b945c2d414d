use thiserror::Error;

use crate::codegen::ast::NodeKind;
use crate::token::{Token, TokenKind};

pub type CompileResult<T> = Result<T, CompilationError>;

/// Any failure of the lex, parse or generate stages.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CompilationError {
    #[error("Failed to lex: {0}")]
    Lex(#[from] LexError),

    #[error("Failed to parse: {0}")]
    Parse(#[from] ParseError),

    #[error("Failed to generate: {0}")]
    Generate(#[from] GeneratorError),
}

/// Why the scanner stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LexFault {
    #[default]
    UnmatchedInput,
    IntegerOverflow,
}

/// No token pattern matched at `offset`; `remainder` is the unconsumed input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{}", describe_lex_error(.reason, .remainder, .offset))]
pub struct LexError {
    pub remainder: String,
    pub offset: usize,
    pub reason: LexFault,
}

fn describe_lex_error(reason: &LexFault, remainder: &str, offset: &usize) -> String {
    match reason {
        LexFault::UnmatchedInput => {
            format!("no token matches at byte {offset}: {remainder:?}")
        }
        LexFault::IntegerOverflow => {
            format!("integer literal out of range at byte {offset}: {remainder:?}")
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("expected {expected}, found {found}")]
    Unexpected { expected: TokenKind, found: Token },

    #[error("expected {expected}, found end of input")]
    UnexpectedEof { expected: TokenKind },

    #[error("expected end of input after the definition, found {found}")]
    TrailingToken { found: Token },

    #[error("invalid integer literal {found}")]
    InvalidInteger { found: Token },

    #[error("calls nested deeper than {limit} levels at {found}")]
    TooDeep { limit: usize, found: Token },
}

impl ParseError {
    /// The kind the grammar wanted, when the failure was a kind mismatch.
    pub fn expected(&self) -> Option<TokenKind> {
        match self {
            ParseError::Unexpected { expected, .. } | ParseError::UnexpectedEof { expected } => {
                Some(*expected)
            }
            ParseError::TrailingToken { .. }
            | ParseError::InvalidInteger { .. }
            | ParseError::TooDeep { .. } => None,
        }
    }

    /// The offending token, if input had not run out.
    pub fn found(&self) -> Option<&Token> {
        match self {
            ParseError::Unexpected { found, .. }
            | ParseError::TrailingToken { found }
            | ParseError::InvalidInteger { found }
            | ParseError::TooDeep { found, .. } => Some(found),
            ParseError::UnexpectedEof { .. } => None,
        }
    }
}

/// A generator was asked to handle a node it has no case for.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("no generator handles `{kind}` node: {node}")]
pub struct GeneratorError {
    pub kind: NodeKind,
    /// Debug rendering of the offending node.
    pub node: String,
}
