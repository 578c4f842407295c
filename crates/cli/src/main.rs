// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! zb: run job workers against a workflow gateway from the command line

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

mod commands;
mod exit_error;
mod shutdown;

use clap::{Parser, Subcommand};
use exit_error::ExitError;

const VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), "+", env!("ZB_BUILD_GIT_HASH"));

#[derive(Parser)]
#[command(name = "zb", version = VERSION, about = "Activate and handle workflow jobs")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Open job workers and log every job they receive
    Worker(commands::worker::WorkerArgs),
    /// Activate jobs once and print them as JSON
    Activate(commands::activate::ActivateArgs),
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Command::Worker(args) => commands::worker::run(args, shutdown::install_handler()).await,
        Command::Activate(args) => commands::activate::run(args).await,
    };

    if let Err(e) = result {
        match e.downcast_ref::<ExitError>() {
            Some(exit) => {
                eprintln!("error: {}", exit);
                std::process::exit(exit.code);
            }
            None => {
                eprintln!("error: {:#}", e);
                std::process::exit(1);
            }
        }
    }
}

#[cfg(test)]
#[path = "main_tests.rs"]
mod tests;
