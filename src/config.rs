//! Compilation settings shared by every stage of the pipeline
//!
//! A single [`CompileOptions`] value is threaded through normalization,
//! lexing and code generation. The command line in [`crate::cli`] builds one;
//! library users can start from [`CompileOptions::default`].

use std::fmt;

/// A revision of the C standard.
///
/// Ordered by publication date so that `standard >= Standard::C11` reads the
/// way it would in a feature table.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, clap::ValueEnum,
)]
pub enum Standard {
    C90,
    C99,
    C11,
    C17,
    #[default]
    C23,
}

impl Standard {
    /// Trigraphs were removed from the language in C23.
    pub fn has_trigraphs(self) -> bool {
        self < Standard::C23
    }
}

impl fmt::Display for Standard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Standard::C90 => "c90",
            Standard::C99 => "c99",
            Standard::C11 => "c11",
            Standard::C17 => "c17",
            Standard::C23 => "c23",
        };
        f.write_str(name)
    }
}

/// Integer data model of the target.
///
/// Only the width of `long` differs between the supported models; `int` is
/// always 32 bits and `long long` always 64.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, clap::ValueEnum)]
pub enum DataModel {
    /// 32-bit `long` (Windows x64 style)
    #[default]
    Llp64,
    /// 64-bit `long` (System V style)
    Lp64,
}

impl DataModel {
    /// Width of `long` in bits.
    pub fn long_bits(self) -> u32 {
        match self {
            DataModel::Llp64 => 32,
            DataModel::Lp64 => 64,
        }
    }
}

/// Default column width of a tab stop, used only for diagnostic positions.
pub const DEFAULT_TAB_WIDTH: usize = 8;

/// Options for one compilation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileOptions {
    pub standard: Standard,
    pub data_model: DataModel,
    /// Tab stop width for column numbers; always at least 1.
    pub tab_width: usize,
    /// Annotate the generated assembly with source comments.
    pub debug: bool,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            standard: Standard::default(),
            data_model: DataModel::default(),
            tab_width: DEFAULT_TAB_WIDTH,
            debug: false,
        }
    }
}

impl CompileOptions {
    pub fn with_standard(mut self, standard: Standard) -> Self {
        self.standard = standard;
        self
    }

    pub fn with_data_model(mut self, data_model: DataModel) -> Self {
        self.data_model = data_model;
        self
    }

    /// Set the tab width; zero is treated as one.
    pub fn with_tab_width(mut self, tab_width: usize) -> Self {
        self.tab_width = tab_width.max(1);
        self
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }
}
