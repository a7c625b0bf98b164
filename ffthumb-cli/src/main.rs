// ffthumb-cli/src/main.rs
//
// Entry point for the `ffthumb` binary.
//
// Responsibilities include:
// - Parsing user-provided arguments, exiting 1 on bad flags or no inputs.
// - Setting up logging to stderr.
// - Running the thumbnail batch and reporting setup failures.

use clap::{CommandFactory, Parser};
use ffthumb_cli::{Cli, logging, run_thumbnail};
use std::process;

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // --help and --version are not failures.
            let code = if e.use_stderr() { 1 } else { 0 };
            let _ = e.print();
            process::exit(code);
        }
    };

    if cli.files.is_empty() {
        eprintln!("{}", Cli::command().render_long_help());
        process::exit(1);
    }

    logging::init(logging::level_for(cli.verbose, cli.quiet));

    if let Err(e) = run_thumbnail(&cli) {
        log::error!("{:#}", e);
        process::exit(1);
    }
}
