use log::{debug, trace};

use crate::codegen::ast::{Define, Expr, FunctionCall, Ident};
use crate::error::ParseError;
use crate::token::{Token, TokenKind};

type ParseResult<T> = Result<T, ParseError>;

/// Deepest call nesting accepted in an expression. Parsing, generation and
/// dropping the tree all recurse once per level, so the bound keeps every
/// stage well inside a thread's stack.
pub const MAX_NESTING: usize = 256;

/// Parses a whole program: exactly one definition and nothing after it.
pub fn parse(tokens: &[Token]) -> ParseResult<Define> {
    let mut parser = Parser::new(tokens);
    let define = parser.parse_define()?;
    parser.finish()?;
    Ok(define)
}

/// Recursive-descent parser over an already lexed token slice.
#[derive(Debug)]
pub struct Parser<'t> {
    tokens: &'t [Token],
    cursor: usize,
    depth: usize,
}

impl<'t> Parser<'t> {
    pub fn new(tokens: &'t [Token]) -> Self {
        Self {
            tokens,
            cursor: 0,
            depth: 0,
        }
    }

    /// Kind of the next unconsumed token.
    pub fn peek(&self) -> Option<TokenKind> {
        self.peek_nth(0)
    }

    /// Kind of the token `n` places past the next one.
    pub fn peek_nth(&self, n: usize) -> Option<TokenKind> {
        self.tokens.get(self.cursor + n).map(Token::kind)
    }

    /// Advances past the next token if it has the `expected` kind.
    pub fn consume(&mut self, expected: TokenKind) -> ParseResult<&'t Token> {
        match self.tokens.get(self.cursor) {
            Some(token) if token.kind() == expected => {
                trace!("consumed {token}");
                self.cursor += 1;
                Ok(token)
            }
            Some(token) => Err(ParseError::Unexpected {
                expected,
                found: token.clone(),
            }),
            None => Err(ParseError::UnexpectedEof { expected }),
        }
    }

    /// Fails if any token is left.
    pub fn finish(&self) -> ParseResult<()> {
        match self.tokens.get(self.cursor) {
            Some(token) => Err(ParseError::TrailingToken {
                found: token.clone(),
            }),
            None => Ok(()),
        }
    }

    /// `"def" IDENT param_list expression "end"`
    pub fn parse_define(&mut self) -> ParseResult<Define> {
        self.consume(TokenKind::Define)?;
        let name = self.parse_ident()?;
        let params = self.parse_list(Self::parse_ident)?;
        let body = self.parse_expr()?;
        self.consume(TokenKind::End)?;

        debug!("parsed definition `{name}` with {} parameter(s)", params.len());
        Ok(Define { name, params, body })
    }

    /// `integer | call | var_ref`, where a call is an identifier directly
    /// followed by `(`.
    pub fn parse_expr(&mut self) -> ParseResult<Expr> {
        if self.peek() == Some(TokenKind::Integer) {
            return self.parse_integer();
        }

        if self.peek() == Some(TokenKind::Identifier)
            && self.peek_nth(1) == Some(TokenKind::OpenParen)
        {
            let callee = self.consume(TokenKind::Identifier)?;
            if self.depth == MAX_NESTING {
                return Err(ParseError::TooDeep {
                    limit: MAX_NESTING,
                    found: callee.clone(),
                });
            }

            self.depth += 1;
            let args = self.parse_list(Self::parse_expr)?;
            self.depth -= 1;

            let name = callee.text().to_string();
            return Ok(Expr::FunctionCall(FunctionCall { name, args }));
        }

        self.parse_ident().map(Expr::VarRef)
    }

    fn parse_integer(&mut self) -> ParseResult<Expr> {
        let token = self.consume(TokenKind::Integer)?;
        let value = token
            .text()
            .parse::<i64>()
            .map_err(|_| ParseError::InvalidInteger {
                found: token.clone(),
            })?;
        Ok(Expr::Integer(value))
    }

    fn parse_ident(&mut self) -> ParseResult<Ident> {
        self.consume(TokenKind::Identifier)
            .map(|token| token.text().to_string())
    }

    /// `"(" [ item ("," item)* ] ")"`, commas are dropped.
    fn parse_list<T>(
        &mut self,
        mut item: impl FnMut(&mut Self) -> ParseResult<T>,
    ) -> ParseResult<Vec<T>> {
        self.consume(TokenKind::OpenParen)?;

        let mut items = Vec::new();
        if self.peek() != Some(TokenKind::CloseParen) {
            items.push(item(self)?);
            while self.peek() == Some(TokenKind::Comma) {
                self.consume(TokenKind::Comma)?;
                items.push(item(self)?);
            }
        }

        self.consume(TokenKind::CloseParen)?;
        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::tokenize;
    use pretty_assertions::assert_eq;

    fn parse_str(source: &str) -> ParseResult<Define> {
        parse(&tokenize(source).expect("source should lex"))
    }

    fn var(name: &str) -> Expr {
        Expr::VarRef(name.to_string())
    }

    fn call(name: &str, args: Vec<Expr>) -> Expr {
        Expr::FunctionCall(FunctionCall {
            name: name.to_string(),
            args,
        })
    }

    #[test]
    fn parses_the_add_example() {
        let define = parse_str("def add(a, b) add(a, b) end").unwrap();
        assert_eq!(
            define,
            Define {
                name: "add".into(),
                params: vec!["a".into(), "b".into()],
                body: call("add", vec![var("a"), var("b")]),
            }
        );
    }

    #[test]
    fn empty_lists_are_accepted() {
        let define = parse_str("def f() g() end").unwrap();
        assert!(define.params.is_empty());
        assert_eq!(define.body, call("g", vec![]));
    }

    #[test]
    fn lookahead_separates_calls_from_references() {
        assert_eq!(parse_str("def f(x) x end").unwrap().body, var("x"));
        assert_eq!(parse_str("def f(x) f() end").unwrap().body, call("f", vec![]));
        assert_eq!(parse_str("def f() 42 end").unwrap().body, Expr::Integer(42));
    }

    #[test]
    fn arguments_nest() {
        let define = parse_str("def f(x) g(1, h(x, 2), y) end").unwrap();
        assert_eq!(
            define.body,
            call(
                "g",
                vec![
                    Expr::Integer(1),
                    call("h", vec![var("x"), Expr::Integer(2)]),
                    var("y"),
                ]
            )
        );
    }

    #[test]
    fn duplicate_params_are_kept() {
        let define = parse_str("def f(a, a) a end").unwrap();
        assert_eq!(define.params, ["a", "a"]);
    }

    #[test]
    fn missing_close_paren_reports_the_offending_token() {
        let err = parse_str("def add(a, b end").unwrap_err();
        assert_eq!(
            err,
            ParseError::Unexpected {
                expected: TokenKind::CloseParen,
                found: Token::new(TokenKind::End, "end"),
            }
        );
        assert_eq!(err.to_string(), r#"expected close_paren, found end("end")"#);
    }

    #[test]
    fn trailing_comma_is_rejected() {
        let err = parse_str("def f(a,) a end").unwrap_err();
        assert_eq!(err.expected(), Some(TokenKind::Identifier));
        assert_eq!(err.found().map(Token::kind), Some(TokenKind::CloseParen));
    }

    #[test]
    fn body_must_be_a_value() {
        let err = parse_str("def f() end").unwrap_err();
        assert_eq!(err.expected(), Some(TokenKind::Identifier));
        assert_eq!(err.found().map(Token::kind), Some(TokenKind::End));
    }

    #[test]
    fn running_out_of_tokens_is_an_error() {
        assert_eq!(
            parse(&[]).unwrap_err(),
            ParseError::UnexpectedEof {
                expected: TokenKind::Define
            }
        );
        assert_eq!(
            parse_str("def f() x").unwrap_err(),
            ParseError::UnexpectedEof {
                expected: TokenKind::End
            }
        );
    }

    #[test]
    fn only_one_definition_per_program() {
        let err = parse_str("def f() 1 end def g() 2 end").unwrap_err();
        assert_eq!(
            err,
            ParseError::TrailingToken {
                found: Token::new(TokenKind::Define, "def"),
            }
        );
    }

    #[test]
    fn hand_built_integer_tokens_are_validated() {
        let tokens = [
            Token::new(TokenKind::Define, "def"),
            Token::new(TokenKind::Identifier, "f"),
            Token::new(TokenKind::OpenParen, "("),
            Token::new(TokenKind::CloseParen, ")"),
            Token::new(TokenKind::Integer, "99999999999999999999"),
            Token::new(TokenKind::End, "end"),
        ];
        assert!(matches!(
            parse(&tokens),
            Err(ParseError::InvalidInteger { .. })
        ));
    }

    fn nested_calls(levels: usize) -> String {
        format!("def f() {}1{} end", "g(".repeat(levels), ")".repeat(levels))
    }

    #[test]
    fn nesting_up_to_the_limit_parses() {
        let mut body = parse_str(&nested_calls(MAX_NESTING)).unwrap().body;
        let mut levels = 0;
        while let Expr::FunctionCall(FunctionCall { mut args, .. }) = body {
            levels += 1;
            body = args.remove(0);
        }
        assert_eq!(levels, MAX_NESTING);
        assert_eq!(body, Expr::Integer(1));
    }

    #[test]
    fn nesting_past_the_limit_is_an_error() {
        let err = parse_str(&nested_calls(MAX_NESTING + 1)).unwrap_err();
        assert_eq!(
            err,
            ParseError::TooDeep {
                limit: MAX_NESTING,
                found: Token::new(TokenKind::Identifier, "g"),
            }
        );
        assert!(matches!(
            parse_str(&nested_calls(10_000)),
            Err(ParseError::TooDeep { .. })
        ));
    }

    #[test]
    fn sibling_calls_do_not_add_depth() {
        let args = vec!["g(h(1))"; MAX_NESTING + 1].join(", ");
        let define = parse_str(&format!("def f() k({args}) end")).unwrap();
        let Expr::FunctionCall(call) = define.body else {
            panic!("expected a call body");
        };
        assert_eq!(call.args.len(), MAX_NESTING + 1);
    }

    #[test]
    fn peeking_does_not_consume() {
        let tokens = tokenize("f(").unwrap();
        let mut parser = Parser::new(&tokens);
        assert_eq!(parser.peek(), Some(TokenKind::Identifier));
        assert_eq!(parser.peek_nth(1), Some(TokenKind::OpenParen));
        assert_eq!(parser.peek_nth(2), None);
        assert_eq!(parser.consume(TokenKind::Identifier).unwrap().text(), "f");
        assert_eq!(parser.peek(), Some(TokenKind::OpenParen));
    }
}
