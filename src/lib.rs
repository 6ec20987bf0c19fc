//! # Introduction
//!
//! minicc compiles a tiny subset of C, functions made of `return`
//! statements over integer constant expressions, to NASM x86-64 assembly.
//! The front end is the interesting part: a lexer that classifies integer
//! literals by the C promotion rules and a parser that builds an index-based
//! syntax tree by narrowing token ranges instead of recursive descent.
//!
//! ## Pipeline
//!
//! ```text
//! Source → normalize → Lexer → Parser → Tree → codegen → assembly
//! ```
//!
//! 1. [`source`]: trigraph replacement, line splicing and the mapping from
//!    normalized offsets back to line and column.
//! 2. [`parser`]: tokens that borrow the source text, and the
//!    [`parser::Tree`] arena built from them.
//! 3. [`codegen`]: walks the tree and writes assembly.
//! 4. [`driver`]: runs the stages and resolves [`diagnostics`] to
//!    locations; [`cli`] is the command-line front of the driver.
//!
//! ## Example
//!
//! ```
//! use minicc::config::CompileOptions;
//!
//! let output = minicc::driver::compile(
//!     "int main(void) { return 1 + 2 * 3; }\n",
//!     &CompileOptions::default(),
//! )
//! .unwrap();
//! assert!(output.assembly.contains("main:"));
//! ```

pub mod cli;
pub mod codegen;
pub mod config;
pub mod diagnostics;
pub mod driver;
pub mod error;
pub mod parser;
pub mod source;
