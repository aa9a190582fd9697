//! Project automation tasks for deckbot

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use std::process::Command;

#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Project automation tasks", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run all tests
    Test,
    /// Run clippy lints
    Lint,
    /// Check formatting
    Fmt,
    /// Formatting, lints and tests, as run in CI
    Ci,
}

fn cargo(args: &[&str]) -> anyhow::Result<()> {
    println!("cargo {}", args.join(" "));
    let status = Command::new(std::env::var("CARGO").unwrap_or_else(|_| "cargo".to_string()))
        .args(args)
        .status()
        .with_context(|| format!("Failed to run cargo {}", args.join(" ")))?;
    if !status.success() {
        bail!("cargo {} failed with {status}", args.join(" "));
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let test = ["test", "--workspace"];
    let lint = ["clippy", "--workspace", "--all-targets", "--", "-D", "warnings"];
    let fmt = ["fmt", "--all", "--check"];

    match cli.command {
        Commands::Test => cargo(&test),
        Commands::Lint => cargo(&lint),
        Commands::Fmt => cargo(&fmt),
        Commands::Ci => {
            cargo(&fmt)?;
            cargo(&lint)?;
            cargo(&test)
        }
    }
}
