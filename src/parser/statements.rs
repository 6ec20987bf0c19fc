//! Statement parsing
//!
//! Only `return [expr] ;` exists in the supported subset.

use super::ast::{Node, NodeId};
use super::parse::{expect, ParseError, Parser};
use super::token::{Token, TokenKind};
use tracing::trace;

impl<'src> Parser<'src> {
    /// Parse one statement from the front of `tokens` and advance `tokens`
    /// past it.
    ///
    /// The terminating `;` is the first one after `return`. Parentheses are
    /// not skipped while looking for it; no expression form can contain a
    /// semicolon.
    pub fn parse_statement(
        &mut self,
        tokens: &mut &[Token<'src>],
    ) -> Result<NodeId, ParseError> {
        trace!(tokens = tokens.len(), "statement");

        let mut rest = *tokens;
        let keyword = expect(&mut rest, TokenKind::Return, "at start of statement")?;

        let end = rest
            .iter()
            .position(|token| token.is(TokenKind::Semicolon))
            .ok_or_else(|| {
                ParseError::syntax("expected ';' after return statement", Some(keyword))
            })?;

        let value = match &rest[..end] {
            [] => None,
            expression => Some(self.parse_expression(expression)?),
        };
        let id = self.push_node(Node::Return { value })?;

        *tokens = &rest[end + 1..];
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::ast::{BinOp, Tree};
    use crate::parser::lexer::Lexer;
    use crate::parser::parse::tests::tokens_of;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_lone_return_fails() {
        let tokens = tokens_of(&[TokenKind::Return]);
        let mut rest = &tokens[..];
        let mut parser = Parser::new(1).unwrap();
        assert!(parser.parse_statement(&mut rest).is_err());
    }

    #[test]
    fn test_lone_semicolon_fails() {
        let tokens = tokens_of(&[TokenKind::Semicolon]);
        let mut rest = &tokens[..];
        let mut parser = Parser::new(1).unwrap();
        let err = parser.parse_statement(&mut rest).unwrap_err();
        assert_eq!(
            err.to_string(),
            "expected 'return' at start of statement, found ';'"
        );
    }

    #[test]
    fn test_empty_return() {
        let tokens = tokens_of(&[TokenKind::Return, TokenKind::Semicolon]);
        let mut rest = &tokens[..];
        let mut parser = Parser::new(2).unwrap();
        let id = parser.parse_statement(&mut rest).unwrap();

        assert!(rest.is_empty());
        assert_eq!(parser.tree().nodes(), &[Node::Return { value: None }]);
        assert_eq!(id, 0);
    }

    #[test]
    fn test_return_value_and_remaining_tokens() {
        let source = "return 1+2; 3";
        let tokens = Lexer::new(source).tokenize().unwrap();
        let mut rest = &tokens[..];
        let mut parser = Parser::new(tokens.len()).unwrap();
        parser.parse_statement(&mut rest).unwrap();

        assert_eq!(rest.len(), 1);
        assert_eq!(rest[0].text, "3");

        let tree: Tree<'_> = parser.finish();
        assert!(matches!(tree.nodes()[0], Node::Constant { text: "1", .. }));
        assert!(matches!(tree.nodes()[1], Node::Constant { text: "2", .. }));
        assert_eq!(
            tree.nodes()[2],
            Node::BinaryOp {
                op: BinOp::Add,
                left: 0,
                right: 1
            }
        );
        assert_eq!(tree.nodes()[3], Node::Return { value: Some(2) });
    }

    #[test]
    fn test_bad_expression_fails_statement() {
        let tokens = Lexer::new("return 1 +;").tokenize().unwrap();
        let mut rest = &tokens[..];
        let mut parser = Parser::new(tokens.len()).unwrap();
        assert!(parser.parse_statement(&mut rest).is_err());
    }
}
