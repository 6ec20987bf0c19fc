//! Top-level error type for a compilation

use crate::codegen::CodegenError;
use crate::parser::{LexError, ParseError};
use crate::source::SourceLocation;
use std::path::PathBuf;
use thiserror::Error;

/// Any fatal failure of the pipeline.
#[derive(Debug, Error)]
pub enum CompileError {
    #[error("{error}")]
    Lex {
        #[source]
        error: LexError,
        location: Option<SourceLocation>,
    },

    #[error("{error}")]
    Parse {
        #[source]
        error: ParseError,
        location: Option<SourceLocation>,
    },

    #[error(transparent)]
    Codegen(#[from] CodegenError),

    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl CompileError {
    /// Where in the original file the error was detected, if known.
    pub fn location(&self) -> Option<SourceLocation> {
        match self {
            CompileError::Lex { location, .. } | CompileError::Parse { location, .. } => {
                *location
            }
            CompileError::Codegen(_) | CompileError::Io { .. } => None,
        }
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        CompileError::Io {
            path: path.into(),
            source,
        }
    }
}

impl From<LexError> for CompileError {
    fn from(error: LexError) -> Self {
        CompileError::Lex {
            error,
            location: None,
        }
    }
}

impl From<ParseError> for CompileError {
    fn from(error: ParseError) -> Self {
        CompileError::Parse {
            error,
            location: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_delegates_to_stage_error() {
        let err = CompileError::from(LexError::UnterminatedComment { offset: 3 });
        assert_eq!(err.to_string(), "unterminated comment");
        assert_eq!(err.location(), None);

        let err = CompileError::from(ParseError::EmptyInput);
        assert_eq!(err.to_string(), "no tokens to parse");

        let err = CompileError::from(CodegenError::MissingProgram);
        assert_eq!(err.to_string(), "syntax tree has no program root");
    }

    #[test]
    fn test_io_error_names_path() {
        let source = std::io::Error::new(std::io::ErrorKind::NotFound, "not found");
        let err = CompileError::io("missing.c", source);
        assert_eq!(err.to_string(), "missing.c: not found");
    }
}
