//! Batchsync CLI
//!
//! Command-line interface for reconciling job definitions and following
//! job runs on the batch service.

mod commands;
mod config;
mod loader;
mod output;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, handle_command};
use config::Config;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "batchsync")]
#[command(about = "Batch job definition sync and job tracking", long_about = None)]
struct Cli {
    /// Job execution service URL
    #[arg(long, env = "BATCHSYNC_BATCH_URL", default_value = "http://localhost:4566")]
    batch_url: String,

    /// Log store URL
    #[arg(long, env = "BATCHSYNC_LOGS_URL", default_value = "http://localhost:4566")]
    logs_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "batchsync=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = Config::load(cli.batch_url, cli.logs_url)?;

    handle_command(cli.command, &config).await
}
