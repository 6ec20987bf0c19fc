//! Non-fatal diagnostics
//!
//! Fatal problems abort a stage through its error type. Everything else is
//! recorded here and reported by the driver once the whole pipeline has run.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => f.write_str("warning"),
            Severity::Error => f.write_str("error"),
        }
    }
}

/// What went wrong.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticKind {
    /// A byte that starts no token; it is skipped.
    UnexpectedCharacter(char),
    /// A `'` that is not followed by one character and a closing `'`.
    MalformedCharacter,
    /// An escape sequence the lexer does not know; the escaped byte is used.
    UnknownEscape(char),
    /// A control byte inside a string literal.
    NonPrintableInString(u8),
    /// A suffix on an integer constant that is not one of u, l, ll and their
    /// combinations.
    InvalidSuffix,
    /// An integer constant too large for every rank it may take.
    IntegerOverflow,
    /// A trigraph sequence that was replaced.
    Trigraph { sequence: [u8; 3], replacement: char },
    /// Input did not end in a newline.
    MissingNewline,
}

impl DiagnosticKind {
    pub fn severity(&self) -> Severity {
        match self {
            DiagnosticKind::UnexpectedCharacter(_)
            | DiagnosticKind::MalformedCharacter
            | DiagnosticKind::InvalidSuffix => Severity::Error,
            DiagnosticKind::UnknownEscape(_)
            | DiagnosticKind::NonPrintableInString(_)
            | DiagnosticKind::IntegerOverflow
            | DiagnosticKind::Trigraph { .. }
            | DiagnosticKind::MissingNewline => Severity::Warning,
        }
    }
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticKind::UnexpectedCharacter(c) => {
                write!(f, "unexpected character {c:?}")
            }
            DiagnosticKind::MalformedCharacter => {
                f.write_str("malformed character constant")
            }
            DiagnosticKind::UnknownEscape(c) => {
                write!(f, "unknown escape sequence '\\{c}'")
            }
            DiagnosticKind::NonPrintableInString(byte) => {
                write!(f, "non-printable character 0x{byte:02x} in string literal")
            }
            DiagnosticKind::InvalidSuffix => {
                f.write_str("invalid suffix on integer constant")
            }
            DiagnosticKind::IntegerOverflow => {
                f.write_str("integer constant is too large for its type")
            }
            DiagnosticKind::Trigraph {
                sequence,
                replacement,
            } => write!(
                f,
                "trigraph {} converted to '{replacement}'",
                String::from_utf8_lossy(sequence)
            ),
            DiagnosticKind::MissingNewline => f.write_str("no newline at end of file"),
        }
    }
}

/// A diagnostic anchored at a byte offset.
///
/// Offsets produced by the lexer refer to the normalized buffer; the driver
/// maps them back to line and column in the original file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub offset: usize,
}

impl Diagnostic {
    pub fn new(kind: DiagnosticKind, offset: usize) -> Self {
        Self { kind, offset }
    }

    pub fn severity(&self) -> Severity {
        self.kind.severity()
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.severity(), self.kind)
    }
}

/// Ordered collection of diagnostics for one stage.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn report(&mut self, kind: DiagnosticKind, offset: usize) {
        tracing::debug!(offset, severity = %kind.severity(), "{kind}");
        self.entries.push(Diagnostic::new(kind, offset));
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.entries.iter()
    }

    pub fn error_count(&self) -> usize {
        self.count(Severity::Error)
    }

    pub fn warning_count(&self) -> usize {
        self.count(Severity::Warning)
    }

    fn count(&self, severity: Severity) -> usize {
        self.entries
            .iter()
            .filter(|diagnostic| diagnostic.severity() == severity)
            .count()
    }

    /// Kinds in report order; convenient for assertions.
    pub fn kinds(&self) -> Vec<DiagnosticKind> {
        self.entries.iter().map(|diagnostic| diagnostic.kind).collect()
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
