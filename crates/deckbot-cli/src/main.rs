//! Command-line interface for deckbot

use anyhow::Context;
use chrono::{Local, NaiveDate};
use clap::Parser;
use deckbot_api::{DatabookClient, DatabookConfig};
use deckbot_cli::{Deckbot, RunOptions};
use deckbot_utils::LogFormat;
use std::io;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "deckbot")]
#[command(about = "Export a company factpack from Databook as a PowerPoint deck", long_about = None)]
struct Args {
    /// Build the deck for this company id instead of asking
    #[arg(long)]
    company_id: Option<String>,

    /// Choose from the built-in sample companies instead of the full list
    #[arg(long)]
    offline: bool,

    /// JSON file with the Databook endpoint and login
    #[arg(long, default_value = "deckbot.json")]
    config: PathBuf,

    /// Directory the deck is written to
    #[arg(long, default_value = "exports")]
    output_dir: PathBuf,

    /// Directory holding cover.jpg
    #[arg(long, default_value = "assets")]
    assets_dir: PathBuf,

    /// Creation date shown on the title slide (YYYY-MM-DD), defaults to today
    #[arg(long)]
    date: Option<NaiveDate>,

    /// Emit logs as JSON lines
    #[arg(long)]
    json_logs: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_format = if args.json_logs {
        LogFormat::Json
    } else {
        LogFormat::Text
    };
    deckbot_utils::init_tracing(deckbot_utils::DEFAULT_FILTER, log_format);

    let config = DatabookConfig::load(Some(&args.config))
        .with_context(|| format!("Invalid configuration in {}", args.config.display()))?;
    info!(endpoint = %config.endpoint, "Starting deckbot");
    let client = DatabookClient::new(config).context("Failed to create the Databook client")?;

    let options = RunOptions {
        company_id: args.company_id,
        offline: args.offline,
        output_dir: args.output_dir,
        assets_dir: args.assets_dir,
        created_on: args.date.unwrap_or_else(|| Local::now().date_naive()),
    };

    Deckbot::new(client, options)
        .run(io::stdin().lock(), io::stdout())
        .await?;
    Ok(())
}
