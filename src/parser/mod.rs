//! C source code front end
//!
//! This module transforms normalized C source text into an arena-backed
//! syntax tree:
//! - [`token`]: token kinds, keyword and punctuator tables, constant ranks
//! - [`lexer`]: tokenization (source text → tokens)
//! - [`literal`]: integer constant scanning and rank promotion
//! - [`ast`]: node definitions and the [`ast::Tree`] arena
//! - [`parse`]: the tree builder (tokens → tree)
//!
//! # Supported C Subset
//!
//! - Functions of the form `int name(void) { ... }`
//! - `return` statements with an optional expression
//! - Integer and character constants combined with the binary operators
//!   `|| && | ^ & == != < <= > >= << >> + - * / %`
//!
//! # Lifetimes
//!
//! Tokens and tree nodes hold `&'src str` views into the lexed buffer. The
//! single `'src` lifetime on [`token::Token`], [`token::TokenList`] and
//! [`ast::Tree`] ties all of them to that buffer.

pub mod ast;
pub mod lexer;
pub mod literal;
pub mod parse;
pub mod token;

mod declarations;
mod expressions;
mod statements;

pub use ast::{BinOp, ChildSpan, Node, NodeId, Tree};
pub use lexer::{LexError, Lexer};
pub use parse::{parse, ParseError, Parser};
pub use token::{Constant, Rank, Token, TokenKind, TokenList};
