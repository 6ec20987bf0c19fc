//! Command-line interface

use crate::config::{CompileOptions, DataModel, Standard, DEFAULT_TAB_WIDTH};
use crate::driver::{Driver, Dumps, Report};
use crate::error::CompileError;
use clap::Parser;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Parser)]
#[command(version, about = "minicc - compile a small subset of C to x86-64 assembly")]
pub struct Args {
    /// Input file
    pub input: PathBuf,

    /// Place output in file (default: input with a .s extension)
    #[arg(short = 'o', value_name = "file")]
    pub output: Option<PathBuf>,

    /// Language standard
    #[arg(long = "std", value_enum, default_value_t = Standard::C23)]
    pub standard: Standard,

    /// Annotate the assembly with source comments
    #[arg(short = 'g')]
    pub debug: bool,

    /// Columns per tab stop when reporting locations
    #[arg(
        long = "tab-width",
        value_name = "n",
        default_value_t = DEFAULT_TAB_WIDTH,
        value_parser = parse_tab_width
    )]
    pub tab_width: usize,

    /// Width of `long`
    #[arg(long = "data-model", value_enum, default_value_t = DataModel::Llp64)]
    pub data_model: DataModel,

    /// Dump tokens to stdout
    #[arg(long = "dump-tokens")]
    pub dump_tokens: bool,

    /// Dump the syntax tree to stdout
    #[arg(long = "dump-ast")]
    pub dump_ast: bool,

    /// Log pipeline stages
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}

fn parse_tab_width(value: &str) -> Result<usize, String> {
    match value.parse::<usize>() {
        Ok(0) => Err("tab width must be at least 1".to_string()),
        Ok(width) => Ok(width),
        Err(err) => Err(err.to_string()),
    }
}

impl Args {
    pub fn to_options(&self) -> CompileOptions {
        CompileOptions::default()
            .with_standard(self.standard)
            .with_data_model(self.data_model)
            .with_tab_width(self.tab_width)
            .with_debug(self.debug)
    }

    pub fn output_path(&self) -> PathBuf {
        match &self.output {
            Some(path) => path.clone(),
            None => self.input.with_extension("s"),
        }
    }

    fn dumps(&self) -> Dumps {
        Dumps {
            tokens: self.dump_tokens,
            tree: self.dump_ast,
        }
    }
}

/// `file:line:col: severity: message`
pub fn format_report(path: &Path, report: &Report) -> String {
    format!("{}:{report}", path.display())
}

/// Compile the input named by `args` and write the assembly.
///
/// Diagnostics go to stderr as they are known, dumps to stdout.
pub fn run(args: &Args) -> Result<(), CompileError> {
    let source =
        fs::read_to_string(&args.input).map_err(|err| CompileError::io(&args.input, err))?;

    let mut driver = Driver::new(args.to_options()).with_dumps(args.dumps());
    let result = driver.compile(&source);

    for report in driver.reports() {
        eprintln!("{}", format_report(&args.input, report));
    }
    if let Some(dump) = driver.token_dump() {
        print!("{dump}");
    }
    if let Some(dump) = driver.tree_dump() {
        print!("{dump}");
    }

    let output = result?;
    let path = args.output_path();
    fs::write(&path, &output.assembly).map_err(|err| CompileError::io(&path, err))?;
    info!(path = %path.display(), "wrote assembly");
    Ok(())
}
