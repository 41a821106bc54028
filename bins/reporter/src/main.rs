//! Tally report runner.
//!
//! Loads a JSON ledger snapshot and prints one report as pretty JSON.

mod commands;
mod snapshot;

use std::path::PathBuf;

use anyhow::Context;
use chrono::{Local, NaiveDate};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use tally_shared::types::UserId;
use tally_shared::{AppConfig, LogConfig};

use crate::commands::{ReportCommand, Runner};
use crate::snapshot::Snapshot;

#[derive(Parser)]
#[command(
    name = "tally-report",
    version,
    about = "Print Tally statistics and budget reports from a ledger snapshot"
)]
struct Cli {
    /// Ledger snapshot (JSON)
    snapshot: PathBuf,

    /// User to report on; the first user in the snapshot when omitted
    #[arg(short, long, env = "TALLY_USER")]
    user: Option<UserId>,

    /// Reference date (YYYY-MM-DD); today in local time when omitted
    #[arg(long)]
    today: Option<NaiveDate>,

    #[command(subcommand)]
    report: ReportCommand,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let config = AppConfig::load().context("failed to load configuration")?;
    init_tracing(&config.logging);

    let cli = Cli::parse();
    let today = cli.today.unwrap_or_else(|| Local::now().date_naive());

    let snapshot = Snapshot::load(&cli.snapshot)?;
    let user = snapshot.user(cli.user)?;
    info!(
        user_id = %user.user_id,
        entries = user.entries.len(),
        budgets = user.budgets.len(),
        today = %today,
        "Loaded snapshot"
    );

    let runner = Runner::new(snapshot.ledger()?, config.statistics);
    let payload = runner.run(cli.report, user, today).await?;

    println!("{}", serde_json::to_string_pretty(&payload)?);
    Ok(())
}

fn init_tracing(logging: &LogConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&logging.filter));

    // stdout carries the report, so logs go to stderr
    if logging.json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}
