pub mod codegen;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod token;

use codegen::{Define, Generator, Node};
use error::CompileResult;
use token::Token;

/// Lexes `source` into its token stream.
pub fn tokenize(source: &str) -> CompileResult<Vec<Token>> {
    Ok(lexer::tokenize(source)?)
}

/// Lexes and parses `source` into its definition.
pub fn parse_source(source: &str) -> CompileResult<Define> {
    let tokens = lexer::tokenize(source)?;
    Ok(parser::parse(&tokens)?)
}

/// Runs the whole pipeline, handing the parsed definition to `generator`.
pub fn compile<G: Generator>(source: &str, generator: &mut G) -> CompileResult<G::Output> {
    let define = parse_source(source)?;
    Ok(generator.generate(Node::from(&define))?)
}
