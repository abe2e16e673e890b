// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! acidctl - inspect and maintain acid-state directories

mod commands;
mod output;
mod store;

#[cfg(test)]
mod test_support;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{dump, inspect, repair, verify};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "acidctl",
    version,
    about = "Inspect, verify and repair acid-state directories"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Summarize the logs in a state directory
    Inspect(inspect::InspectArgs),
    /// Print log records as JSON lines
    Dump(dump::DumpArgs),
    /// Check both logs for corruption
    Verify(verify::VerifyArgs),
    /// Truncate corrupted logs at their first bad record
    Repair(repair::RepairArgs),
}

fn main() -> Result<ExitCode> {
    setup_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Inspect(args) => inspect::handle(args)?,
        Commands::Dump(args) => dump::handle(args)?,
        Commands::Verify(args) => {
            if !verify::handle(args)? {
                return Ok(ExitCode::FAILURE);
            }
        }
        Commands::Repair(args) => repair::handle(args)?,
    }
    Ok(ExitCode::SUCCESS)
}

fn setup_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
