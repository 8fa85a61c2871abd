//! Student Registry server
//!
//! Loads configuration, opens storage and serves the JSON API until
//! interrupted.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::net::TcpListener;
use tracing::info;

use registry_core::Config;
use registry_server::{server, AppState};

#[derive(Parser)]
#[command(name = "registry")]
#[command(about = "Student Registry - JSON API for student records")]
#[command(version)]
struct Cli {
    /// Path to the config file (must exist when given)
    #[arg(short, long, env = "REGISTRY_CONFIG")]
    config: Option<PathBuf>,

    /// Listen address, overrides http_server.address
    #[arg(short, long)]
    address: Option<String>,

    /// Serve from an in-memory store instead of SQLite
    #[arg(long)]
    memory: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_required(path)?,
        None => Config::load()?,
    };
    if let Some(address) = cli.address {
        config.http_server.address = address;
    }

    server::init_logging(&config.log_level);
    info!(
        env = %config.env,
        version = env!("CARGO_PKG_VERSION"),
        "configuration loaded"
    );

    let store = server::open_store(&config, cli.memory)?;
    info!(
        backend = store.name(),
        path = ?config.storage_path,
        reset_on_start = config.reset_on_start,
        "storage initialized"
    );

    let listener = TcpListener::bind(&config.http_server.address)
        .await
        .with_context(|| format!("Failed to bind {}", config.http_server.address))?;
    info!(address = %listener.local_addr()?, "server starting");

    server::serve(listener, AppState::new(store))
        .await
        .context("Server failed")?;

    info!("server exited");
    Ok(())
}
