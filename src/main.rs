// minicc: a small C compiler front end with an x86-64 back end

use clap::Parser;
use minicc::cli::{self, Args};
use std::process::ExitCode;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(true))
        .with(filter)
        .init();
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose);

    match cli::run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            match err.location() {
                Some(location) => {
                    eprintln!("{}:{location}: error: {err}", args.input.display())
                }
                None => eprintln!("minicc: error: {err}"),
            }
            ExitCode::FAILURE
        }
    }
}
