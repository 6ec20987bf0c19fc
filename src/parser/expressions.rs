//! Expression parsing
//!
//! An expression range is split at its loosest-binding top-level operator.
//! Each precedence level scans the range right to left, stepping over
//! parenthesized groups whole, and splits at the first operator of that level
//! it meets. Splitting at the rightmost occurrence makes the operators
//! left-associative: `a - b - c` becomes `(a - b) - c`.

use super::ast::{BinOp, Node, NodeId};
use super::parse::{skip_parentheses, Direction, ParseError, Parser};
use super::token::{Token, TokenKind};
use tracing::trace;

/// Binary operator levels, loosest first.
const PRECEDENCE: &[&[(TokenKind, BinOp)]] = &[
    &[(TokenKind::BarBar, BinOp::Or)],
    &[(TokenKind::AmpersandAmpersand, BinOp::And)],
    &[(TokenKind::Bar, BinOp::BitOr)],
    &[(TokenKind::Caret, BinOp::BitXor)],
    &[(TokenKind::Ampersand, BinOp::BitAnd)],
    &[
        (TokenKind::EqualEqual, BinOp::Eq),
        (TokenKind::NotEqual, BinOp::Ne),
    ],
    &[
        (TokenKind::Less, BinOp::Lt),
        (TokenKind::LessEqual, BinOp::Le),
        (TokenKind::Greater, BinOp::Gt),
        (TokenKind::GreaterEqual, BinOp::Ge),
    ],
    &[
        (TokenKind::LeftShift, BinOp::BitShl),
        (TokenKind::RightShift, BinOp::BitShr),
    ],
    &[(TokenKind::Plus, BinOp::Add), (TokenKind::Minus, BinOp::Sub)],
    &[
        (TokenKind::Star, BinOp::Mul),
        (TokenKind::Slash, BinOp::Div),
        (TokenKind::Percent, BinOp::Mod),
    ],
];

impl<'src> Parser<'src> {
    /// Parse the whole of `tokens` as one expression and return its root.
    pub fn parse_expression(
        &mut self,
        tokens: &[Token<'src>],
    ) -> Result<NodeId, ParseError> {
        trace!(tokens = tokens.len(), "expression");

        let Some(first) = tokens.first() else {
            return Err(ParseError::syntax("expected an expression", None));
        };

        // A range that is one parenthesized group is parsed as its contents.
        let group_end = skip_parentheses(tokens, 0, Direction::Forward)
            .ok_or_else(|| ParseError::syntax("unbalanced parenthesis", Some(first)))?;
        if first.is(TokenKind::OpenParen) && group_end == tokens.len() - 1 {
            if tokens.len() < 3 {
                return Err(ParseError::syntax(
                    "expected an expression inside parentheses",
                    Some(first),
                ));
            }
            return self.parse_expression(&tokens[1..tokens.len() - 1]);
        }

        for level in PRECEDENCE {
            if let Some(id) = self.parse_binary_operator(tokens, level)? {
                return Ok(id);
            }
        }

        match tokens {
            [token] => match token.constant {
                Some(constant) if token.is(TokenKind::Constant) => {
                    self.push_node(Node::Constant {
                        constant,
                        text: token.text,
                    })
                }
                _ => Err(ParseError::syntax(
                    format!("expected a constant, found {}", token.kind),
                    Some(token),
                )),
            },
            _ => Err(ParseError::syntax("invalid expression", Some(first))),
        }
    }

    /// Split `tokens` at the rightmost top-level operator of `level`.
    ///
    /// `Ok(None)` means the level has no top-level operator in this range.
    fn parse_binary_operator(
        &mut self,
        tokens: &[Token<'src>],
        level: &[(TokenKind, BinOp)],
    ) -> Result<Option<NodeId>, ParseError> {
        let is_level = |token: &Token<'src>| level.iter().any(|(kind, _)| token.is(*kind));

        let mut index = tokens.len() - 1;
        if is_level(&tokens[index]) {
            return Err(ParseError::syntax(
                format!("expected an operand after {}", tokens[index].kind),
                Some(&tokens[index]),
            ));
        }

        while index > 0 {
            index = skip_parentheses(tokens, index, Direction::Backward)
                .ok_or_else(|| {
                    ParseError::syntax("unbalanced parenthesis", Some(&tokens[index]))
                })?;
            if index == 0 {
                break;
            }
            index -= 1;

            let token = &tokens[index];
            let Some(&(_, op)) = level.iter().find(|(kind, _)| token.is(*kind))
            else {
                continue;
            };

            if index == 0 {
                return Err(ParseError::syntax(
                    format!("expected an operand before {}", token.kind),
                    Some(token),
                ));
            }

            let left = self.parse_expression(&tokens[..index])?;
            let right = self.parse_expression(&tokens[index + 1..])?;
            return self
                .push_node(Node::BinaryOp { op, left, right })
                .map(Some);
        }

        Ok(None)
    }
}
