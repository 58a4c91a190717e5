//! Closes overdue tasks in the `PostgreSQL` tracker store.
//!
//! Usage:
//!
//! ```text
//! taskboard-autoclose [--once] [--interval-minutes <N>] [--database-url <URL>]
//! ```
//!
//! Without `--once` the sweep runs immediately and then every
//! `--interval-minutes` (default 15, or `AUTOCLOSE_INTERVAL_MINUTES`) until
//! Ctrl-C. Limits and status values are read from the environment as
//! described in [`taskboard::config`].

use clap::Parser;
use mockable::DefaultClock;
use std::sync::Arc;
use std::time::Duration;
use taskboard::config::{TrackerConfig, load_dotenv};
use taskboard::tracker::{
    adapters::postgres::PostgresTrackerStore,
    services::{OverdueSweeper, TaskService},
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Boxed error type for the main result.
type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Parser)]
#[command(name = "taskboard-autoclose", version)]
#[command(about = "Close tasks whose deadline has passed")]
struct Cli {
    /// `PostgreSQL` connection URL.
    #[arg(long, env = "DATABASE_URL")]
    database_url: String,

    /// Minutes between sweeps.
    #[arg(
        long,
        env = "AUTOCLOSE_INTERVAL_MINUTES",
        default_value_t = 15,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    interval_minutes: u64,

    /// Run a single sweep and exit.
    #[arg(long)]
    once: bool,
}

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    load_dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = Arc::new(TrackerConfig::from_env()?);
    let store = Arc::new(PostgresTrackerStore::connect(&cli.database_url)?);
    let service = TaskService::new(Arc::clone(&store), store, Arc::new(DefaultClock), config);
    let sweeper = OverdueSweeper::new(service);

    if cli.once {
        let closed = sweeper.run_once().await?;
        info!(closed, "single sweep complete");
        return Ok(());
    }

    let period = Duration::from_secs(cli.interval_minutes.saturating_mul(60));
    info!(interval_minutes = cli.interval_minutes, "starting overdue sweeper");
    sweeper
        .run_every(period, async {
            if let Err(err) = tokio::signal::ctrl_c().await {
                warn!(error = %err, "failed to listen for shutdown signal");
                std::future::pending::<()>().await;
            }
        })
        .await;
    Ok(())
}
