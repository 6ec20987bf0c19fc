//! Compilation pipeline
//!
//! ```text
//! source → normalize → Lexer → parse → codegen::emit → assembly
//! ```
//!
//! A [`Driver`] runs the stages in order and keeps everything reported along
//! the way, so diagnostics and dumps gathered before a fatal error stay
//! available to the caller.

use crate::codegen;
use crate::config::CompileOptions;
use crate::diagnostics::{Diagnostic, Diagnostics, Severity};
use crate::error::CompileError;
use crate::parser::{parse, Lexer};
use crate::source::{normalize, NormalizedSource, SourceLocation};
use std::fmt;
use tracing::debug;

/// A diagnostic resolved to a position in the original file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Report {
    pub diagnostic: Diagnostic,
    pub location: SourceLocation,
}

impl Report {
    pub fn severity(&self) -> Severity {
        self.diagnostic.severity()
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.location, self.diagnostic)
    }
}

/// Result of a successful compilation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Output {
    pub assembly: String,
    pub reports: Vec<Report>,
}

/// Which intermediate results to render while compiling.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Dumps {
    pub tokens: bool,
    pub tree: bool,
}

pub struct Driver {
    options: CompileOptions,
    dumps: Dumps,
    reports: Vec<Report>,
    token_dump: Option<String>,
    tree_dump: Option<String>,
}

impl Driver {
    pub fn new(options: CompileOptions) -> Self {
        Self {
            options,
            dumps: Dumps::default(),
            reports: Vec::new(),
            token_dump: None,
            tree_dump: None,
        }
    }

    pub fn with_dumps(mut self, dumps: Dumps) -> Self {
        self.dumps = dumps;
        self
    }

    pub fn options(&self) -> &CompileOptions {
        &self.options
    }

    /// Diagnostics reported so far, including those of a failed run.
    pub fn reports(&self) -> &[Report] {
        &self.reports
    }

    pub fn token_dump(&self) -> Option<&str> {
        self.token_dump.as_deref()
    }

    pub fn tree_dump(&self) -> Option<&str> {
        self.tree_dump.as_deref()
    }

    /// Compile one translation unit.
    pub fn compile(&mut self, source: &str) -> Result<Output, CompileError> {
        self.reports.clear();
        self.token_dump = None;
        self.tree_dump = None;

        let (normalized, diagnostics) = normalize(source, &self.options);
        self.record(&normalized, &diagnostics);
        debug!(stage = "normalize", bytes = normalized.text().len(), "done");

        let mut lexer = Lexer::with_options(normalized.text(), &self.options);
        let lexed = lexer.tokenize();
        self.record(&normalized, lexer.diagnostics());
        let tokens = lexed.map_err(|error| {
            let location = error.offset().map(|offset| normalized.location(offset));
            CompileError::Lex { error, location }
        })?;
        debug!(stage = "lex", tokens = tokens.len(), "done");
        if self.dumps.tokens {
            self.token_dump = Some(tokens.to_string());
        }

        let tree = parse(&tokens).map_err(|error| {
            let location = error.offset().map(|offset| normalized.location(offset));
            CompileError::Parse { error, location }
        })?;
        debug!(stage = "parse", nodes = tree.len(), "done");
        if self.dumps.tree {
            self.tree_dump = Some(tree.to_string());
        }

        let assembly = codegen::emit(&tree, &self.options)?;
        debug!(stage = "codegen", bytes = assembly.len(), "done");

        Ok(Output {
            assembly,
            reports: self.reports.clone(),
        })
    }

    fn record(&mut self, source: &NormalizedSource<'_>, diagnostics: &Diagnostics) {
        self.reports.extend(diagnostics.iter().map(|&diagnostic| Report {
            diagnostic,
            location: source.location(diagnostic.offset),
        }));
    }
}

/// Compile `source` with `options` and no dumps.
pub fn compile(source: &str, options: &CompileOptions) -> Result<Output, CompileError> {
    Driver::new(options.clone()).compile(source)
}
