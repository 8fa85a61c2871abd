//! Server bootstrap
//!
//! Logging setup, store selection, and serving with graceful shutdown.

use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use registry_core::{Config, MemoryStore, SqliteStore, StudentStore};

use crate::{router, AppState};

/// Initialize stderr logging
///
/// `RUST_LOG` wins when set; otherwise both crates log at `level`.
pub fn init_logging(level: &str) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("registry_core={},registry_server={}", level, level))
    });

    // Ignore error if already initialized
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .try_init();
}

/// Open the configured store, or an empty memory store when `memory` is set
pub fn open_store(config: &Config, memory: bool) -> Result<Arc<dyn StudentStore>> {
    if memory {
        return Ok(Arc::new(MemoryStore::new()));
    }

    let store = SqliteStore::open(&config.storage_path, config.schema_policy())
        .with_context(|| format!("Failed to open storage at {:?}", config.storage_path))?;
    Ok(Arc::new(store))
}

/// Serve until a shutdown signal arrives, then drain in-flight requests
pub async fn serve(listener: TcpListener, state: AppState) -> std::io::Result<()> {
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
}

/// Resolve on Ctrl+C, or SIGTERM on unix
pub async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c().await.ok();
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(_) => std::future::pending::<()>().await,
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Graceful shutdown initiated");
}
