//! Assembly generation
//!
//! Walks `Program → Function → Return → expression` and writes NASM x86-64
//! (Intel syntax). Expressions are evaluated into `rax`; the left operand of
//! a binary operator waits on the stack while the right one is computed.
//!
//! Values are kept canonical in 64-bit registers: 32-bit signed values are
//! sign-extended and 32-bit unsigned values zero-extended. Conversions to a
//! 64-bit type are then free and conversions to a 32-bit type re-extend.

use crate::config::{CompileOptions, DataModel};
use crate::parser::ast::{BinOp, ChildSpan, Node, NodeId, Tree};
use crate::parser::token::Rank;
use rustc_hash::FxHashSet;
use std::fmt::{self, Write};
use thiserror::Error;
use tracing::{debug, trace};

#[derive(Debug, Error)]
pub enum CodegenError {
    #[error("syntax tree has no program root")]
    MissingProgram,

    #[error("function '{name}' is defined more than once")]
    DuplicateSymbol { name: String },

    #[error("node {id} is used as an expression but is not one")]
    NotAnExpression { id: NodeId },

    #[error("failed to format assembly: {0}")]
    Format(#[from] fmt::Error),
}

/// Generate assembly for a whole program.
pub fn emit(tree: &Tree<'_>, options: &CompileOptions) -> Result<String, CodegenError> {
    let functions = match tree.last().map(|root| tree.node(root)) {
        Some(Node::Program { functions }) => *functions,
        _ => return Err(CodegenError::MissingProgram),
    };

    let mut emitter = Emitter {
        tree,
        options,
        out: String::new(),
        next_label: 0,
    };
    emitter.program(functions)?;

    debug!(
        functions = functions.count,
        bytes = emitter.out.len(),
        "emitted assembly"
    );
    Ok(emitter.out)
}

struct Emitter<'t, 'src> {
    tree: &'t Tree<'src>,
    options: &'t CompileOptions,
    out: String,
    next_label: usize,
}

impl<'t, 'src> Emitter<'t, 'src> {
    fn program(&mut self, functions: ChildSpan) -> Result<(), CodegenError> {
        let tree = self.tree;
        let mut seen = FxHashSet::default();
        let mut bodies = Vec::new();

        for &id in tree.children(functions) {
            if let Node::Function { name, statements } = *tree.node(id) {
                if !seen.insert(name) {
                    return Err(CodegenError::DuplicateSymbol {
                        name: name.to_string(),
                    });
                }
                bodies.push((name, statements));
            }
        }

        writeln!(self.out, "section .text")?;
        for (name, _) in &bodies {
            writeln!(self.out, "global {name}")?;
        }

        for (name, statements) in bodies {
            self.function(name, statements)?;
        }
        Ok(())
    }

    fn function(
        &mut self,
        name: &'src str,
        statements: ChildSpan,
    ) -> Result<(), CodegenError> {
        trace!(name, statements = statements.count, "function");

        writeln!(self.out)?;
        writeln!(self.out, "{name}:")?;
        if self.options.debug {
            writeln!(self.out, "\t; int {name}(void)")?;
        }

        let tree = self.tree;
        for &id in tree.children(statements) {
            if let Node::Return { value } = *tree.node(id) {
                self.return_statement(value)?;
            }
        }

        // Falling off the end returns 0.
        writeln!(self.out, "\txor eax, eax")?;
        writeln!(self.out, "\tret")?;
        Ok(())
    }

    fn return_statement(&mut self, value: Option<NodeId>) -> Result<(), CodegenError> {
        match value {
            Some(value) => {
                if self.options.debug {
                    let rendered = self.render(value);
                    writeln!(self.out, "\t; return {rendered}")?;
                }
                self.expression(value)?;
            }
            None => {
                if self.options.debug {
                    writeln!(self.out, "\t; return")?;
                }
                writeln!(self.out, "\txor eax, eax")?;
            }
        }
        writeln!(self.out, "\tret")?;
        Ok(())
    }

    /// Evaluate `id` into `rax`.
    fn expression(&mut self, id: NodeId) -> Result<(), CodegenError> {
        match *self.tree.node(id) {
            Node::Constant { constant, .. } => {
                if constant.value <= u64::from(u32::MAX) {
                    writeln!(self.out, "\tmov eax, {}", constant.value)?;
                } else {
                    writeln!(self.out, "\tmov rax, {}", constant.value)?;
                }
                Ok(())
            }
            Node::BinaryOp { op, left, right } => match op {
                BinOp::And | BinOp::Or => self.logical(op, left, right),
                _ => self.binary(op, left, right),
            },
            Node::Program { .. } | Node::Function { .. } | Node::Return { .. } => {
                Err(CodegenError::NotAnExpression { id })
            }
        }
    }

    fn binary(&mut self, op: BinOp, left: NodeId, right: NodeId) -> Result<(), CodegenError> {
        let model = self.options.data_model;
        let left_rank = self.rank(left);
        let right_rank = self.rank(right);
        let is_shift = matches!(op, BinOp::BitShl | BinOp::BitShr);
        let operand_rank = if is_shift {
            left_rank
        } else {
            left_rank.common(right_rank, model)
        };

        self.expression(left)?;
        self.convert(left_rank, operand_rank)?;
        writeln!(self.out, "\tpush rax")?;
        self.expression(right)?;
        if !is_shift {
            self.convert(right_rank, operand_rank)?;
        }
        writeln!(self.out, "\tmov rcx, rax")?;
        writeln!(self.out, "\tpop rax")?;

        let unsigned = operand_rank.is_unsigned();
        match op {
            BinOp::Add => writeln!(self.out, "\tadd rax, rcx")?,
            BinOp::Sub => writeln!(self.out, "\tsub rax, rcx")?,
            BinOp::Mul => writeln!(self.out, "\timul rax, rcx")?,
            BinOp::Div | BinOp::Mod => {
                if unsigned {
                    writeln!(self.out, "\txor edx, edx")?;
                    writeln!(self.out, "\tdiv rcx")?;
                } else {
                    writeln!(self.out, "\tcqo")?;
                    writeln!(self.out, "\tidiv rcx")?;
                }
                if op == BinOp::Mod {
                    writeln!(self.out, "\tmov rax, rdx")?;
                }
            }
            BinOp::BitAnd => writeln!(self.out, "\tand rax, rcx")?,
            BinOp::BitOr => writeln!(self.out, "\tor rax, rcx")?,
            BinOp::BitXor => writeln!(self.out, "\txor rax, rcx")?,
            BinOp::BitShl => writeln!(self.out, "\tshl rax, cl")?,
            BinOp::BitShr if unsigned => writeln!(self.out, "\tshr rax, cl")?,
            BinOp::BitShr => writeln!(self.out, "\tsar rax, cl")?,
            BinOp::Eq | BinOp::Ne | BinOp::Lt | BinOp::Le | BinOp::Gt | BinOp::Ge => {
                writeln!(self.out, "\tcmp rax, rcx")?;
                writeln!(self.out, "\tset{} al", condition(op, unsigned))?;
                writeln!(self.out, "\tmovzx eax, al")?;
                return Ok(());
            }
            BinOp::And | BinOp::Or => {}
        }

        self.canonicalize(operand_rank)
    }

    /// Short-circuit `&&` and `||`. The result is 0 or 1.
    fn logical(&mut self, op: BinOp, left: NodeId, right: NodeId) -> Result<(), CodegenError> {
        let short = self.label();
        let end = self.label();
        // `&&` stops on a false operand, `||` on a true one.
        let (jump, short_value, fall_value) = match op {
            BinOp::And => ("je", 0, 1),
            _ => ("jne", 1, 0),
        };

        for operand in [left, right] {
            self.expression(operand)?;
            writeln!(self.out, "\ttest rax, rax")?;
            writeln!(self.out, "\t{jump} {short}")?;
        }
        writeln!(self.out, "\tmov eax, {fall_value}")?;
        writeln!(self.out, "\tjmp {end}")?;
        writeln!(self.out, "{short}:")?;
        writeln!(self.out, "\tmov eax, {short_value}")?;
        writeln!(self.out, "{end}:")?;
        Ok(())
    }

    /// Re-extend `rax` after converting a value of rank `from` to `to`.
    fn convert(&mut self, from: Rank, to: Rank) -> Result<(), CodegenError> {
        if from == to {
            return Ok(());
        }
        self.canonicalize(to)
    }

    fn canonicalize(&mut self, rank: Rank) -> Result<(), CodegenError> {
        if rank.bits(self.options.data_model) == 32 {
            if rank.is_unsigned() {
                writeln!(self.out, "\tmov eax, eax")?;
            } else {
                writeln!(self.out, "\tmovsxd rax, eax")?;
            }
        }
        Ok(())
    }

    /// Type of the value `id` evaluates to.
    fn rank(&self, id: NodeId) -> Rank {
        rank_of(self.tree, id, self.options.data_model)
    }

    /// A fresh function-local label.
    fn label(&mut self) -> String {
        let label = format!(".L{}", self.next_label);
        self.next_label += 1;
        label
    }

    /// Source-like rendering of an expression for debug comments.
    fn render(&self, id: NodeId) -> String {
        match *self.tree.node(id) {
            Node::Constant { text, .. } => text.to_string(),
            Node::BinaryOp { op, left, right } => {
                let operand = |child: NodeId| match self.tree.node(child) {
                    Node::BinaryOp { .. } => format!("({})", self.render(child)),
                    _ => self.render(child),
                };
                format!("{} {op} {}", operand(left), operand(right))
            }
            _ => String::new(),
        }
    }
}

fn rank_of(tree: &Tree<'_>, id: NodeId, model: DataModel) -> Rank {
    match *tree.node(id) {
        Node::Constant { constant, .. } => constant.rank,
        Node::BinaryOp { op, .. } if op.yields_int() => Rank::Int,
        Node::BinaryOp {
            op: BinOp::BitShl | BinOp::BitShr,
            left,
            ..
        } => rank_of(tree, left, model),
        Node::BinaryOp { left, right, .. } => {
            rank_of(tree, left, model).common(rank_of(tree, right, model), model)
        }
        _ => Rank::Int,
    }
}

fn condition(op: BinOp, unsigned: bool) -> &'static str {
    match (op, unsigned) {
        (BinOp::Eq, _) => "e",
        (BinOp::Ne, _) => "ne",
        (BinOp::Lt, false) => "l",
        (BinOp::Le, false) => "le",
        (BinOp::Gt, false) => "g",
        (BinOp::Ge, false) => "ge",
        (BinOp::Lt, true) => "b",
        (BinOp::Le, true) => "be",
        (BinOp::Gt, true) => "a",
        (BinOp::Ge, true) => "ae",
        _ => "e",
    }
}
