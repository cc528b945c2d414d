use log::trace;
use logos::Logos;

use crate::error::{LexError, LexFault};
use crate::token::{Token, TokenKind};

/// Splits `source` into tokens, in source order.
///
/// Surrounding whitespace is trimmed first and whitespace between tokens is
/// dropped. The first position no pattern accepts aborts the whole scan, and
/// the error carries the rest of the input from that point. A word token that
/// runs straight into another word character (`abc123`, `a_b`, `abé`) counts
/// as unmatched from the start of the word.
pub fn tokenize(source: &str) -> Result<Vec<Token>, LexError> {
    let source = source.trim();
    let mut lexer = TokenKind::lexer(source);
    let mut tokens = Vec::new();

    while let Some(result) = lexer.next() {
        let span = lexer.span();
        match result {
            Ok(kind) if kind.is_word_bounded() && continues_word(&source[span.end..]) => {
                return Err(LexError {
                    remainder: source[span.start..].to_string(),
                    offset: span.start,
                    reason: LexFault::UnmatchedInput,
                });
            }
            Ok(kind) => {
                let token = Token::new(kind, lexer.slice());
                trace!("{}..{}: {}", span.start, span.end, token);
                tokens.push(token);
            }
            Err(reason) => {
                return Err(LexError {
                    remainder: source[span.start..].to_string(),
                    offset: span.start,
                    reason,
                });
            }
        }
    }

    Ok(tokens)
}

fn continues_word(rest: &str) -> bool {
    rest.chars()
        .next()
        .is_some_and(|c| c.is_alphanumeric() || c == '_')
}
