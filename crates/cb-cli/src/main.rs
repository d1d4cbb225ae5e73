//! Caribou CLI - versioned schema migrations for embedded DuckDB databases

use anyhow::Result;
use cb_core::CoreError;
use clap::Parser;
use std::process::ExitCode;

mod cli;
mod commands;
mod context;

use cli::{Cli, Commands};
use commands::{create, downgrade, info, list, upgrade, version};

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            // --help and --version also land here and are not failures.
            let failed = err.use_stderr();
            let _ = err.print();
            return if failed {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    init_logging(cli.global.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report(&err);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    match &cli.command {
        Commands::Create(args) => create::execute(args, &cli.global),
        Commands::Version => version::execute(&cli.global),
        Commands::Upgrade(args) => upgrade::execute(args, &cli.global),
        Commands::Downgrade(args) => downgrade::execute(args, &cli.global),
        Commands::List(args) => list::execute(args, &cli.global),
        Commands::Info => info::execute(&cli.global),
    }
}

/// `RUST_LOG` wins; otherwise `warn`, or `debug` with `--verbose`.
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}

/// Print an error the way its kind deserves.
///
/// Migration load faults get the whole cause chain, invocation mistakes a
/// single line, anything else is flagged as unexpected.
fn report(err: &anyhow::Error) {
    match err.downcast_ref::<CoreError>() {
        Some(core) if core.is_load_error() => eprintln!("Error: {err:?}"),
        Some(core) if core.is_usage_error() => eprintln!("Error: {err:#}"),
        Some(_) => eprintln!("Error: an unexpected error occurred: {err:?}"),
        None => eprintln!("Error: {err:#}"),
    }
}
