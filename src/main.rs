//! Panoptes Binary Entry Point
//!
//! This binary runs the reachability service. Core functionality is provided
//! by the `panoptes` library crate.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use panoptes::{
    config::AppConfig,
    probe::{IcmpPinger, Pinger, ProbePool},
    server::{AppState, create_router},
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Log file in the working directory, append-only, no rotation.
const LOG_FILE: &str = "panoptes.log";

/// Panoptes - Host Reachability Service
#[derive(Parser, Debug)]
#[command(name = "panoptes", version, about, long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, env = "PANOPTES_CONFIG")]
    config: Option<PathBuf>,

    /// Server bind address (overrides config file)
    #[arg(long, env = "PANOPTES_BIND")]
    bind: Option<String>,

    /// Server port (overrides config file)
    #[arg(long, env = "PANOPTES_PORT")]
    port: Option<u16>,

    /// Host list file (overrides config file)
    #[arg(long, env = "PANOPTES_HOSTS_FILE")]
    hosts_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing: console plus an append-only log file
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(LOG_FILE)?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,panoptes=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(Arc::new(log_file))
                .with_ansi(false),
        )
        .init();

    tracing::info!("Panoptes - Host Reachability Service");

    // Parse CLI arguments
    let cli = Cli::parse();

    // Load configuration from file, or fall back to defaults
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            AppConfig::load(path)?
        }
        None => AppConfig::default(),
    };

    // Apply CLI/env overrides (CLI > ENV > config file)
    if let Some(bind) = cli.bind {
        config.server.bind = bind;
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }
    if let Some(hosts_file) = cli.hosts_file {
        config.hosts_file = hosts_file;
    }

    tracing::info!(
        "Server: {}:{}, hosts file: {}, workers: {}, probe timeout: {:?}",
        config.server.bind,
        config.server.port,
        config.hosts_file.display(),
        config.probe.workers,
        config.probe.timeout,
    );

    // Build the shared probe pool once; all requests fan out over it
    let pinger: Arc<dyn Pinger> = Arc::new(IcmpPinger::new());
    let pool = Arc::new(ProbePool::new(&config.probe, pinger));

    let app_state = AppState {
        pool,
        hosts_path: config.hosts_file.clone(),
    };

    // Build Axum router
    let app = create_router(app_state);

    // Parse bind address
    let addr: SocketAddr = format!("{}:{}", config.server.bind, config.server.port).parse()?;

    tracing::info!("Web server listening on: http://{}", addr);
    tracing::info!("Press Ctrl+C to shutdown");

    // Start server with graceful shutdown
    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Shutdown complete");
    Ok(())
}

/// Setup graceful shutdown signal handler.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal");
        }
        _ = terminate => {
            tracing::info!("Received terminate signal");
        }
    }
}
