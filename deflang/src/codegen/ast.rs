use std::fmt;

/// Name of a function, parameter or variable.
pub type Ident = String;

/// A function definition, the root of every parsed program.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Define {
    /// Function name.
    pub name: Ident,
    /// Parameter names in declaration order (duplicates are not rejected).
    pub params: Vec<Ident>,
    /// The single expression the function evaluates to.
    pub body: Expr,
}

/// Represents a value-producing term.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Expr {
    /// Signed integer literal.
    Integer(i64),
    /// Function call.
    FunctionCall(FunctionCall),
    /// Reference to a variable (a parameter, in practice).
    VarRef(Ident),
}

/// Represents a call such as `add(a, 1)`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FunctionCall {
    /// Name of the callee function.
    pub name: Ident,
    /// Arguments passed to the function.
    pub args: Vec<Expr>,
}

/// A borrowed view of any syntax tree node.
///
/// This is the closed set generators dispatch on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Node<'a> {
    Define(&'a Define),
    Integer(i64),
    FunctionCall(&'a FunctionCall),
    VarRef(&'a str),
}

/// The variant tag of a [`Node`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Define,
    Integer,
    FunctionCall,
    VarRef,
}

impl Node<'_> {
    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Define(_) => NodeKind::Define,
            Node::Integer(_) => NodeKind::Integer,
            Node::FunctionCall(_) => NodeKind::FunctionCall,
            Node::VarRef(_) => NodeKind::VarRef,
        }
    }
}

impl<'a> From<&'a Define> for Node<'a> {
    fn from(define: &'a Define) -> Self {
        Node::Define(define)
    }
}

impl<'a> From<&'a Expr> for Node<'a> {
    fn from(expr: &'a Expr) -> Self {
        match expr {
            Expr::Integer(value) => Node::Integer(*value),
            Expr::FunctionCall(call) => Node::FunctionCall(call),
            Expr::VarRef(name) => Node::VarRef(name),
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NodeKind::Define => "Define",
            NodeKind::Integer => "Integer",
            NodeKind::FunctionCall => "FunctionCall",
            NodeKind::VarRef => "VarRef",
        };
        f.write_str(name)
    }
}
