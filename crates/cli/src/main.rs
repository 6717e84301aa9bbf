//! Allowlist CLI
//!
//! Command-line front end for `allowlist-merkle`: prints the root of an
//! address list, the proof for one address, or checks a proof against a root.
//! Output is JSON on stdout; logs go to stderr.
//!
//! Exit status is 0 for a positive answer, 1 for a negative one (address not
//! in the list, proof not valid) and 2 when the command could not run.

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use serde_json::Value;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;
mod input;

use cli::{Cli, Commands};

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(&cli) {
        Ok((output, success)) => {
            println!("{output}");
            if success {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::from(2)
        }
    }
}

fn run(cli: &Cli) -> Result<(Value, bool)> {
    let config = cli.tree_config();

    match &cli.command {
        Commands::Root { file } => Ok((commands::root(file, &config)?, true)),
        Commands::Proof {
            file,
            address,
            legacy,
        } => commands::proof(file, address, *legacy, &config),
        Commands::Verify {
            address,
            root,
            proof,
        } => commands::verify(address, root, proof),
    }
}

/// Install the stderr subscriber; `RUST_LOG` overrides the `-v` level.
fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(std::io::stderr)
        .init();
}
