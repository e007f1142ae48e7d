//! School core server binary.

use anyhow::{Context, Result};
use clap::Parser;
use school_core_server::bootstrap::build_service;
use school_core_server::config::LogConfig;
use school_core_server::{create_router, AppConfig, AppState};
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Recycle bin and audit history for school records
#[derive(Parser, Debug)]
#[command(name = "school-core-server")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(
        short,
        long,
        env = "SCHOOL_CORE_CONFIG",
        default_value = "config/server.toml"
    )]
    config: PathBuf,
}

fn init_tracing(log: &LogConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,tower_http=info".into());
    let registry = tracing_subscriber::registry().with(filter);
    if log.json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
    tracing::info!("Shutdown signal received");
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Logging settings live in the config, so load it first
    let config = AppConfig::load(&args.config).context("failed to load configuration")?;
    init_tracing(&config.log);

    tracing::info!("school-core-server v{}", env!("CARGO_PKG_VERSION"));
    if args.config.exists() {
        tracing::info!(config_path = %args.config.display(), "Loaded configuration file");
    } else {
        tracing::info!(
            config_path = %args.config.display(),
            "No configuration file, using defaults and environment"
        );
    }

    let service = build_service(&config)
        .await
        .context("failed to initialize storage backend")?;
    let app = create_router(AppState::new(service));

    let addr: SocketAddr = config.server.bind.parse().context("invalid bind address")?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind to {}", addr))?;
    tracing::info!("Listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}
