//! Featherflow config CLI - resolve and validate layered node configs

use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;

use cli::Cli;
use commands::common::ExitCode;
use commands::{compare, fields, resolve, snapshot};

fn main() {
    let cli = Cli::parse();

    if let Err(err) = run(&cli) {
        match err.downcast_ref::<ExitCode>() {
            Some(ExitCode(code)) => std::process::exit(*code),
            None => {
                eprintln!("Error: {err:#}");
                std::process::exit(1);
            }
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    match &cli.command {
        cli::Commands::Resolve(args) => resolve::execute(args, &cli.global),
        cli::Commands::Compare(args) => compare::execute(args, &cli.global),
        cli::Commands::Snapshot(args) => snapshot::execute(args, &cli.global),
        cli::Commands::Fields(args) => fields::execute(args, &cli.global),
    }
}
