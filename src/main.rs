//! Dashboard server binary
//!
//! Loads configuration, opens the PostgreSQL pool once, applies migrations
//! and serves the dashboard until Ctrl+C or SIGTERM.

use clap::Parser;
use dashboard::prelude::*;
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser)]
#[command(name = "invoice-dashboard")]
#[command(about = "Admin dashboard for invoices and customers", long_about = None)]
struct Cli {
    /// YAML configuration file
    #[arg(short, long, env = "DASHBOARD_CONFIG")]
    config: Option<PathBuf>,

    /// Insert sample customers and invoices before serving
    #[arg(long)]
    seed: bool,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => DashboardConfig::from_yaml_file(&path.to_string_lossy())?,
        None => DashboardConfig::default(),
    }
    .with_env_overrides();
    config.validate()?;

    // RUST_LOG wins over the configured filter
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.filter))
    };
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    let store = PgStore::connect(&config.database).await?;
    store.run_migrations().await?;
    if cli.seed {
        store.seed().await?;
    }

    ServerBuilder::new()
        .with_store(store)
        .serve(&config.server.bind)
        .await
}
