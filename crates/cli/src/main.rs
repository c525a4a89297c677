// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! mx - Lamport mutual exclusion simulator and model checker

mod commands;
mod completions;
mod error;
mod output;

use clap::{Parser, Subcommand};
use commands::{config, explore, simulate};
use error::MxError;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "mx",
    version,
    about = "mx - Lamport mutual exclusion over FIFO channels"
)]
struct Cli {
    /// Log filter used when RUST_LOG is unset, e.g. "info" or "mx_engine=debug"
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a live in-memory cluster and print the order of entries
    Simulate(simulate::SimulateArgs),
    /// Check safety and deadlock freedom over every interleaving
    Explore(explore::ExploreArgs),
    /// Print the default cluster configuration as TOML
    Config,
    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    match run(cli.command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            match e.downcast_ref::<MxError>() {
                Some(friendly) => eprint!("{}", friendly),
                None => eprintln!("error: {:#}", e),
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::Simulate(args) => simulate::run(args).await,
        Commands::Explore(args) => explore::run(args),
        Commands::Config => config::run(),
        Commands::Completions(args) => {
            completions::generate_completions::<Cli>(args.shell);
            Ok(())
        }
    }
}

/// Logs go to stderr so stdout stays parseable
fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
