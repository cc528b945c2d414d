use logos::{Lexer, Logos};

use crate::error::LexFault;

use std::fmt;

/// The closed set of lexical categories.
///
/// Variants are listed in matching priority order: keywords, then identifiers,
/// then integers, then punctuation. The trailing word boundary of the word
/// kinds is checked by the lexer, see [`TokenKind::is_word_bounded`].
#[derive(Logos, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[logos(error = LexFault)]
#[logos(skip r"\s+")]
pub enum TokenKind {
    #[token("def", priority = 6)]
    Define,
    #[token("end", priority = 6)]
    End,
    #[regex(r"[A-Za-z]+", priority = 3)]
    Identifier,
    #[regex(r"[0-9]+", check_integer_range, priority = 3)]
    Integer,
    #[token("(")]
    OpenParen,
    #[token(")")]
    CloseParen,
    #[token(",")]
    Comma,
}

fn check_integer_range(lex: &mut Lexer<TokenKind>) -> Result<(), LexFault> {
    lex.slice()
        .parse::<i64>()
        .map(|_| ())
        .map_err(|_| LexFault::IntegerOverflow)
}

impl TokenKind {
    /// Stable name of the kind, as used in diagnostics.
    pub const fn name(self) -> &'static str {
        match self {
            TokenKind::Define => "define",
            TokenKind::End => "end",
            TokenKind::Identifier => "identifier",
            TokenKind::Integer => "integer",
            TokenKind::OpenParen => "open_paren",
            TokenKind::CloseParen => "close_paren",
            TokenKind::Comma => "comma",
        }
    }

    /// Keyword, identifier and integer tokens must not be followed by another
    /// word character.
    pub const fn is_word_bounded(self) -> bool {
        matches!(
            self,
            TokenKind::Define | TokenKind::End | TokenKind::Identifier | TokenKind::Integer
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A classified piece of source text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
    kind: TokenKind,
    text: String,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }

    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    /// The exact substring the token was matched from.
    pub fn text(&self) -> &str {
        &self.text
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({:?})", self.kind, self.text)
    }
}
