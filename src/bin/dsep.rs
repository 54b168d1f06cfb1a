//! `dsep`: answers `X ⫫ Y | Z` queries against a DAG read from disk.
//!
//! Exit codes: 0 on success, 1 on I/O or input errors, 2 on usage errors.

use std::io;
use std::process::ExitCode;

use clap::Parser;

use dsep::cli::{configure_threads, run, Cli};
use dsep::logging::init_tracing;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = configure_threads(cli.jobs).and_then(|()| run(cli, &mut io::stdout().lock()));
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
