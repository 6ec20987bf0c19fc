//! Function and program parsing

use super::ast::{Node, NodeId};
use super::parse::{expect, ParseError, Parser};
use super::token::{Token, TokenKind};
use tracing::trace;

impl<'src> Parser<'src> {
    /// Parse the whole token range as a sequence of functions and append the
    /// `Program` node, which is always the last node of the tree.
    pub fn parse_program(
        &mut self,
        tokens: &[Token<'src>],
    ) -> Result<NodeId, ParseError> {
        trace!(tokens = tokens.len(), "program");

        let mut rest = tokens;
        let mut count = 0;
        while !rest.is_empty() {
            let function = self.parse_function(&mut rest)?;
            self.push_scratch(function)?;
            count += 1;
        }

        let functions = self.commit(count);
        self.push_node(Node::Program { functions })
    }

    /// Parse `int name ( [void] ) { statement* }` from the front of `tokens`
    /// and advance `tokens` past the closing brace.
    pub fn parse_function(
        &mut self,
        tokens: &mut &[Token<'src>],
    ) -> Result<NodeId, ParseError> {
        trace!(tokens = tokens.len(), "function");

        let mut rest = *tokens;
        expect(&mut rest, TokenKind::Int, "at start of function")?;
        let name = expect(&mut rest, TokenKind::Identifier, "as function name")?;
        expect(&mut rest, TokenKind::OpenParen, "after function name")?;
        if rest.first().is_some_and(|token| token.is(TokenKind::Void)) {
            rest = &rest[1..];
        }
        expect(&mut rest, TokenKind::CloseParen, "to close parameter list")?;
        let open = expect(&mut rest, TokenKind::OpenBrace, "to open function body")?;

        let body_len = matching_brace(rest).ok_or_else(|| {
            ParseError::syntax(
                format!("unterminated body of function '{}'", name.text),
                Some(open),
            )
        })?;

        let mut body = &rest[..body_len];
        let mut count = 0;
        while !body.is_empty() {
            let statement = self.parse_statement(&mut body)?;
            self.push_scratch(statement)?;
            count += 1;
        }
        let statements = self.commit(count);

        let id = self.push_node(Node::Function {
            name: name.text,
            statements,
        })?;

        *tokens = &rest[body_len + 1..];
        Ok(id)
    }
}

/// Index of the `}` closing a body whose `{` was just consumed.
fn matching_brace(tokens: &[Token<'_>]) -> Option<usize> {
    let mut depth = 1usize;
    for (index, token) in tokens.iter().enumerate() {
        match token.kind {
            TokenKind::OpenBrace => depth += 1,
            TokenKind::CloseBrace => {
                depth -= 1;
                if depth == 0 {
                    return Some(index);
                }
            }
            _ => {}
        }
    }
    None
}
