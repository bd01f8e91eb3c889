//! primecache CLI - Command-line interface
//!
//! Computes the primes of a configured range, or loads them from the cache
//! artifact written by an earlier run.

mod commands;
mod error;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use commands::cache::CacheAction;
use commands::common::RangeArgs;

/// Find the odd primes of a range, memoized to an NPY file.
#[derive(Debug, Parser)]
#[command(name = "primecache", version, about)]
struct Cli {
    /// Config file (INI). Defaults to ./primecache.ini when present
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory holding cache artifacts
    #[arg(long, global = true)]
    cache_dir: Option<PathBuf>,

    #[command(flatten)]
    range: RangeArgs,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Load the cached primes, computing them first if absent (default)
    Run {
        /// Recompute and overwrite the cached artifact
        #[arg(long)]
        force: bool,

        /// Print every prime, one per line
        #[arg(long)]
        print: bool,
    },
    /// Report whether a single number is prime
    Check {
        /// Number to test
        #[arg(allow_negative_numbers = true)]
        number: i64,
    },
    /// Manage the cache artifacts
    Cache {
        #[command(subcommand)]
        action: CacheAction,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    primecache::logging::init_logging(cli.verbose);

    let settings = match commands::common::resolve_settings(
        cli.config.as_deref(),
        cli.cache_dir,
        &cli.range,
    ) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let result = match cli.command {
        None => commands::run::run(&settings, false, false),
        Some(Command::Run { force, print }) => commands::run::run(&settings, force, print),
        Some(Command::Check { number }) => {
            commands::check::run(number);
            Ok(())
        }
        Some(Command::Cache { action }) => commands::cache::run(action, &settings),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
