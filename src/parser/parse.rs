//! Main parser coordinator
//!
//! This module provides the [`Parser`] struct (the tree builder), the error
//! type, and the [`parse`] entry point.
//!
//! # Parser Architecture
//!
//! Every production works on a token sub-slice rather than a cursor:
//! - `expressions`: splits a range at its loosest top-level operator
//! - `statements`: `return [expr] ;`, narrowing the remaining range
//! - `declarations`: functions and the program
//!
//! Parser methods are split across those files using `impl Parser` blocks.
//!
//! # Child buffer
//!
//! `Program` and `Function` have a number of children that is unknown until
//! they are fully parsed. Their child ids are pushed onto a scratch region
//! that grows downward from the end of the tree's child array, then moved in
//! one block to the committed region that grows upward from the start. A
//! nested production simply uses the scratch space below its parent's
//! pending entries.

use crate::parser::ast::{ChildSpan, Node, NodeId, Tree};
use crate::parser::token::{Token, TokenKind};
use thiserror::Error;

/// Parser error type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("no tokens to parse")]
    EmptyInput,

    #[error("{message}")]
    InvalidSyntax {
        message: String,
        /// Byte offset of the offending token, when there is one.
        offset: Option<usize>,
    },

    #[error("out of memory while building the syntax tree")]
    OutOfMemory,
}

impl ParseError {
    pub(crate) fn syntax(message: impl Into<String>, at: Option<&Token<'_>>) -> Self {
        ParseError::InvalidSyntax {
            message: message.into(),
            offset: at.map(|token| token.offset),
        }
    }

    pub fn offset(&self) -> Option<usize> {
        match self {
            ParseError::InvalidSyntax { offset, .. } => *offset,
            ParseError::EmptyInput | ParseError::OutOfMemory => None,
        }
    }
}

/// Scan direction for [`skip_parentheses`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

impl Direction {
    /// The parenthesis that opens a group when scanning this way.
    fn opening(self) -> TokenKind {
        match self {
            Direction::Forward => TokenKind::OpenParen,
            Direction::Backward => TokenKind::CloseParen,
        }
    }

    fn closing(self) -> TokenKind {
        match self {
            Direction::Forward => TokenKind::CloseParen,
            Direction::Backward => TokenKind::OpenParen,
        }
    }
}

/// Skip the parenthesized group starting at `index`.
///
/// Returns the index of the matching parenthesis, or `index` itself if the
/// token there is not a parenthesis. Returns `None` if the token closes a
/// group in this direction or its group is not closed inside `tokens`.
pub fn skip_parentheses(
    tokens: &[Token<'_>],
    index: usize,
    direction: Direction,
) -> Option<usize> {
    let kind = tokens.get(index)?.kind;
    if kind == direction.closing() {
        return None;
    }
    if kind != direction.opening() {
        return Some(index);
    }

    let mut depth = 1usize;
    let mut cursor = index;
    loop {
        cursor = match direction {
            Direction::Forward if cursor + 1 < tokens.len() => cursor + 1,
            Direction::Backward if cursor > 0 => cursor - 1,
            _ => return None,
        };

        let current = tokens[cursor].kind;
        if current == direction.opening() {
            depth += 1;
        } else if current == direction.closing() {
            depth -= 1;
            if depth == 0 {
                return Some(cursor);
            }
        }
    }
}

/// Parse a whole token sequence into a tree rooted at a `Program` node.
///
/// An empty sequence is rejected rather than treated as an empty program.
pub fn parse<'src>(tokens: &[Token<'src>]) -> Result<Tree<'src>, ParseError> {
    if tokens.is_empty() {
        return Err(ParseError::EmptyInput);
    }

    let mut parser = Parser::new(tokens.len())?;
    parser.parse_program(tokens)?;
    Ok(parser.finish())
}

/// Tree builder for the supported C subset
pub struct Parser<'src> {
    pub(crate) tree: Tree<'src>,
    /// End of the committed region of `tree.children`.
    committed: usize,
    /// Start of the scratch region, which runs to the end of `tree.children`.
    scratch: usize,
}

impl<'src> Parser<'src> {
    /// Create a builder whose child buffer starts with room for
    /// `child_capacity` entries. Every child is built from at least one
    /// token, so the token count is always enough.
    pub fn new(child_capacity: usize) -> Result<Self, ParseError> {
        let mut tree = Tree::new();
        tree.nodes
            .try_reserve(child_capacity + 1)
            .map_err(|_| ParseError::OutOfMemory)?;
        tree.children
            .try_reserve_exact(child_capacity)
            .map_err(|_| ParseError::OutOfMemory)?;
        tree.children.resize(child_capacity, 0);

        Ok(Self {
            tree,
            committed: 0,
            scratch: child_capacity,
        })
    }

    /// The tree built so far. Its child array still includes scratch space.
    pub fn tree(&self) -> &Tree<'src> {
        &self.tree
    }

    /// Give up the tree, dropping the unused part of the child buffer.
    pub fn finish(mut self) -> Tree<'src> {
        debug_assert_eq!(self.scratch, self.tree.children.len());
        self.tree.children.truncate(self.committed);
        self.tree
    }

    // ===== Helper methods =====

    pub(crate) fn push_node(&mut self, node: Node<'src>) -> Result<NodeId, ParseError> {
        self.tree.push(node).map_err(|_| ParseError::OutOfMemory)
    }

    /// Record a child id in the scratch region.
    pub(crate) fn push_scratch(&mut self, id: NodeId) -> Result<(), ParseError> {
        if self.scratch == self.committed {
            self.grow_children()?;
        }
        self.scratch -= 1;
        self.tree.children[self.scratch] = id;
        Ok(())
    }

    /// Move the `count` most recent scratch entries to the committed region,
    /// in the order they were pushed.
    pub(crate) fn commit(&mut self, count: usize) -> ChildSpan {
        let start = self.committed;
        if count > 0 {
            let children = &mut self.tree.children;
            children.copy_within(self.scratch..self.scratch + count, start);
            children[start..start + count].reverse();
            self.committed += count;
            self.scratch += count;
        }
        debug_assert!(self.committed <= self.scratch);
        ChildSpan::new(start, count)
    }

    /// Number of entries currently waiting in the scratch region.
    pub(crate) fn scratch_len(&self) -> usize {
        self.tree.children.len() - self.scratch
    }

    /// Enlarge the child buffer, keeping scratch entries at its end.
    fn grow_children(&mut self) -> Result<(), ParseError> {
        let children = &mut self.tree.children;
        let old_len = children.len();
        let extra = old_len.max(4);

        children
            .try_reserve(extra)
            .map_err(|_| ParseError::OutOfMemory)?;
        children.resize(old_len + extra, 0);
        children.copy_within(self.scratch..old_len, self.scratch + extra);
        self.scratch += extra;
        Ok(())
    }
}

/// Pops the first token off `tokens` if it has the wanted kind.
pub(crate) fn expect<'a, 'src>(
    tokens: &mut &'a [Token<'src>],
    kind: TokenKind,
    context: &str,
) -> Result<&'a Token<'src>, ParseError> {
    match tokens.split_first() {
        Some((token, rest)) if token.kind == kind => {
            *tokens = rest;
            Ok(token)
        }
        Some((token, _)) => Err(ParseError::syntax(
            format!("expected {kind} {context}, found {}", token.kind),
            Some(token),
        )),
        None => Err(ParseError::syntax(
            format!("expected {kind} {context}, found end of input"),
            None,
        )),
    }
}
