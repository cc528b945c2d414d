//! The `codegen` module holds the syntax tree produced by the parser and the
//! contract backends implement to turn that tree into output.
//!
//! Generation dispatches exhaustively over [`ast::Node`], so every backend
//! either handles a node kind or reports it as unhandled.

pub mod ast;
pub use ast::{Define, Expr, FunctionCall, Ident, Node, NodeKind};

/// The [`Generator`](generator::Generator) trait and the handler-less backend.
pub mod generator;
pub use generator::{GenerateResult, Generator, Unimplemented};

/// A backend emitting C functions.
pub mod c;
pub use c::CBackend;
