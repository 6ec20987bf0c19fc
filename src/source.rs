//! Source normalization and position tracking
//!
//! Before lexing, the raw file goes through one pass that replaces trigraphs
//! (before C23), removes backslash-newline splices and guarantees a final
//! newline. The lexer then works on the normalized text, so every offset it
//! reports has to be mapped back to the original file. Each edit records a
//! breakpoint for that mapping.

use crate::config::CompileOptions;
use crate::diagnostics::{DiagnosticKind, Diagnostics};
use std::fmt;

/// Source location information for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct SourceLocation {
    pub line: usize,
    pub column: usize,
}

impl SourceLocation {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// From `normalized` onward, normalized offsets are shifted by
/// `original - normalized`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Breakpoint {
    normalized: usize,
    original: usize,
}

/// The normalized text plus what is needed to map it back.
#[derive(Debug, Clone)]
pub struct NormalizedSource<'a> {
    original: &'a str,
    text: String,
    breakpoints: Vec<Breakpoint>,
    tab_width: usize,
}

impl<'a> NormalizedSource<'a> {
    /// The text handed to the lexer.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Offset in the original file of a byte of the normalized text.
    pub fn original_offset(&self, offset: usize) -> usize {
        let index = self
            .breakpoints
            .partition_point(|breakpoint| breakpoint.normalized <= offset);
        let mapped = match index.checked_sub(1) {
            Some(previous) => {
                let breakpoint = self.breakpoints[previous];
                offset - breakpoint.normalized + breakpoint.original
            }
            None => offset,
        };
        mapped.min(self.original.len())
    }

    /// Line and column in the original file of a normalized offset.
    ///
    /// Both are 1-based; a tab advances the column to the next tab stop.
    pub fn location(&self, offset: usize) -> SourceLocation {
        let end = self.original_offset(offset);
        let mut location = SourceLocation::new(1, 1);

        for &byte in &self.original.as_bytes()[..end] {
            match byte {
                b'\n' => {
                    location.line += 1;
                    location.column = 1;
                }
                b'\t' => {
                    let stop = (location.column - 1) / self.tab_width + 1;
                    location.column = stop * self.tab_width + 1;
                }
                // UTF-8 continuation bytes do not start a column
                0x80..=0xBF => {}
                _ => location.column += 1,
            }
        }

        location
    }
}

fn trigraph_replacement(third: u8) -> Option<char> {
    let replacement = match third {
        b'=' => '#',
        b'(' => '[',
        b'/' => '\\',
        b')' => ']',
        b'\'' => '^',
        b'<' => '{',
        b'!' => '|',
        b'>' => '}',
        b'-' => '~',
        _ => return None,
    };
    Some(replacement)
}

/// Length of the line break starting at `index`, if there is one.
fn newline_len(bytes: &[u8], index: usize) -> usize {
    match (bytes.get(index), bytes.get(index + 1)) {
        (Some(b'\n'), _) => 1,
        (Some(b'\r'), Some(b'\n')) => 2,
        _ => 0,
    }
}

/// Normalize `original` for lexing.
pub fn normalize<'a>(
    original: &'a str,
    options: &CompileOptions,
) -> (NormalizedSource<'a>, Diagnostics) {
    let bytes = original.as_bytes();
    let trigraphs = options.standard.has_trigraphs();

    let mut text = String::with_capacity(original.len() + 1);
    let mut breakpoints = Vec::new();
    let mut diagnostics = Diagnostics::new();

    let mut index = 0;
    let mut run_start = 0;
    while index < bytes.len() {
        let trigraph = match &bytes[index..] {
            [b'?', b'?', third, ..] if trigraphs => trigraph_replacement(*third)
                .map(|replacement| (*third, replacement)),
            _ => None,
        };

        if let Some((third, replacement)) = trigraph {
            text.push_str(&original[run_start..index]);
            diagnostics.report(
                DiagnosticKind::Trigraph {
                    sequence: [b'?', b'?', third],
                    replacement,
                },
                text.len(),
            );
            index += 3;

            // `??/` followed by a newline is itself a line splice.
            let splice = if replacement == '\\' {
                newline_len(bytes, index)
            } else {
                0
            };
            if splice == 0 {
                text.push(replacement);
            }
            index += splice;
            run_start = index;
            breakpoints.push(Breakpoint {
                normalized: text.len(),
                original: index,
            });
            continue;
        }

        if bytes[index] == b'\\' {
            let splice = newline_len(bytes, index + 1);
            if splice > 0 {
                text.push_str(&original[run_start..index]);
                index += 1 + splice;
                run_start = index;
                breakpoints.push(Breakpoint {
                    normalized: text.len(),
                    original: index,
                });
                continue;
            }
        }

        index += 1;
    }
    text.push_str(&original[run_start..]);

    if !original.is_empty() && !text.ends_with('\n') {
        diagnostics.report(DiagnosticKind::MissingNewline, text.len());
        text.push('\n');
    }

    tracing::debug!(
        original = original.len(),
        normalized = text.len(),
        edits = breakpoints.len(),
        "normalized source"
    );

    let source = NormalizedSource {
        original,
        text,
        breakpoints,
        tab_width: options.tab_width.max(1),
    };
    (source, diagnostics)
}
