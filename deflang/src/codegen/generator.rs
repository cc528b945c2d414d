use crate::codegen::ast::{Define, FunctionCall, Node};
use crate::error::GeneratorError;

pub type GenerateResult<T> = Result<T, GeneratorError>;

/// A backend that turns syntax tree nodes into some artifact.
///
/// [`Generator::generate`] dispatches over every [`Node`] variant with no
/// catch-all arm, so adding a variant breaks the build until it is routed to
/// a handler. Handlers a backend does not override fail with a
/// [`GeneratorError`] naming the node instead of producing a default value.
pub trait Generator {
    type Output;

    fn generate(&mut self, node: Node<'_>) -> GenerateResult<Self::Output> {
        match node {
            Node::Define(define) => self.visit_define(define),
            Node::Integer(value) => self.visit_integer(value),
            Node::FunctionCall(call) => self.visit_function_call(call),
            Node::VarRef(name) => self.visit_var_ref(name),
        }
    }

    fn visit_define(&mut self, define: &Define) -> GenerateResult<Self::Output> {
        Err(unhandled(Node::Define(define)))
    }

    fn visit_integer(&mut self, value: i64) -> GenerateResult<Self::Output> {
        Err(unhandled(Node::Integer(value)))
    }

    fn visit_function_call(&mut self, call: &FunctionCall) -> GenerateResult<Self::Output> {
        Err(unhandled(Node::FunctionCall(call)))
    }

    fn visit_var_ref(&mut self, name: &str) -> GenerateResult<Self::Output> {
        Err(unhandled(Node::VarRef(name)))
    }
}

/// The error for a node the current backend has no case for.
pub fn unhandled(node: Node<'_>) -> GeneratorError {
    GeneratorError {
        kind: node.kind(),
        node: format!("{node:?}"),
    }
}

/// A generator with no handlers. Every node is rejected.
#[derive(Debug, Default, Clone, Copy)]
pub struct Unimplemented;

impl Generator for Unimplemented {
    type Output = ();
}
