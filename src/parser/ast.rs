// AST (Abstract Syntax Tree) definitions for the compiler front end

use super::token::Constant;
use std::collections::TryReserveError;
use std::fmt;

/// Index of a node in [`Tree::nodes`]
pub type NodeId = usize;

/// A contiguous run of entries in the tree's shared child-index array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ChildSpan {
    pub start: usize,
    pub count: usize,
}

impl ChildSpan {
    pub fn new(start: usize, count: usize) -> Self {
        Self { start, count }
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

/// Binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinOp {
    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    // Comparison
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    // Logical
    And,
    Or,
    // Bitwise
    BitAnd,
    BitOr,
    BitXor,
    BitShl,
    BitShr,
}

impl BinOp {
    pub fn as_str(self) -> &'static str {
        match self {
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
            BinOp::Mod => "%",
            BinOp::Eq => "==",
            BinOp::Ne => "!=",
            BinOp::Lt => "<",
            BinOp::Le => "<=",
            BinOp::Gt => ">",
            BinOp::Ge => ">=",
            BinOp::And => "&&",
            BinOp::Or => "||",
            BinOp::BitAnd => "&",
            BinOp::BitOr => "|",
            BinOp::BitXor => "^",
            BinOp::BitShl => "<<",
            BinOp::BitShr => ">>",
        }
    }

    /// Comparison and logical operators always yield `int`.
    pub fn yields_int(self) -> bool {
        matches!(
            self,
            BinOp::Eq
                | BinOp::Ne
                | BinOp::Lt
                | BinOp::Le
                | BinOp::Gt
                | BinOp::Ge
                | BinOp::And
                | BinOp::Or
        )
    }
}

impl fmt::Display for BinOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One arena entry. References to other nodes are indices, and always point
/// backwards (to a smaller [`NodeId`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Node<'src> {
    Program {
        functions: ChildSpan,
    },
    Function {
        name: &'src str,
        statements: ChildSpan,
    },
    Return {
        value: Option<NodeId>,
    },
    BinaryOp {
        op: BinOp,
        left: NodeId,
        right: NodeId,
    },
    Constant {
        constant: Constant,
        /// Spelling of the literal in the source.
        text: &'src str,
    },
}

/// Flat storage for a whole parse.
///
/// Nodes are appended in post-order, so the last node pushed is the root of
/// the most recently completed subtree. `Program` and `Function` name their
/// children through [`ChildSpan`]s into `children`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tree<'src> {
    pub(crate) nodes: Vec<Node<'src>>,
    pub(crate) children: Vec<NodeId>,
}

impl<'src> Tree<'src> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a node and return its index.
    pub fn push(&mut self, node: Node<'src>) -> Result<NodeId, TryReserveError> {
        self.nodes.try_reserve(1)?;
        self.nodes.push(node);
        Ok(self.nodes.len() - 1)
    }

    pub fn nodes(&self) -> &[Node<'src>] {
        &self.nodes
    }

    pub fn node(&self, id: NodeId) -> &Node<'src> {
        &self.nodes[id]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The most recently appended node.
    pub fn last(&self) -> Option<NodeId> {
        self.nodes.len().checked_sub(1)
    }

    /// The whole child-index array.
    pub fn child_indices(&self) -> &[NodeId] {
        &self.children
    }

    pub fn children(&self, span: ChildSpan) -> &[NodeId] {
        &self.children[span.start..span.start + span.count]
    }

    /// Functions of the program at the root, if the root is a program.
    pub fn functions(&self) -> Option<&[NodeId]> {
        match self.nodes.last()? {
            Node::Program { functions } => Some(self.children(*functions)),
            _ => None,
        }
    }

    fn write_node(
        &self,
        f: &mut fmt::Formatter<'_>,
        id: NodeId,
        depth: usize,
    ) -> fmt::Result {
        let indent = depth * 2;
        match self.nodes[id] {
            Node::Program { functions } => {
                writeln!(f, "{:indent$}Program", "")?;
                for &child in self.children(functions) {
                    self.write_node(f, child, depth + 1)?;
                }
            }
            Node::Function { name, statements } => {
                writeln!(f, "{:indent$}Function {name}", "")?;
                for &child in self.children(statements) {
                    self.write_node(f, child, depth + 1)?;
                }
            }
            Node::Return { value } => {
                writeln!(f, "{:indent$}Return", "")?;
                if let Some(value) = value {
                    self.write_node(f, value, depth + 1)?;
                }
            }
            Node::BinaryOp { op, left, right } => {
                writeln!(f, "{:indent$}BinaryOp {op}", "")?;
                self.write_node(f, left, depth + 1)?;
                self.write_node(f, right, depth + 1)?;
            }
            Node::Constant { constant, .. } => {
                writeln!(f, "{:indent$}Constant {constant}", "")?;
            }
        }
        Ok(())
    }
}

/// Indented dump starting at the last node.
impl fmt::Display for Tree<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.last() {
            Some(root) => self.write_node(f, root, 0),
            None => Ok(()),
        }
    }
}
