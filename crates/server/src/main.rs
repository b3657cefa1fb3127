use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use sha2::{Digest, Sha256};
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use triage_core::{load_config, validate_config, Config, ConfigError};
use triage_server::{api::create_router, state::AppState};

/// Application version
const VERSION: &str = env!("CARGO_PKG_VERSION");

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("Fatal error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting triage server v{}", VERSION);

    // Determine config path
    let config_path = std::env::var("TRIAGE_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("config.toml"));

    // Load configuration
    info!("Loading configuration from {:?}", config_path);
    let config = match load_config(&config_path) {
        Ok(config) => config,
        Err(ConfigError::FileNotFound(path)) => {
            warn!("Config file {} not found, using defaults", path);
            Config::default()
        }
        Err(e) => {
            return Err(e).with_context(|| format!("Failed to load config from {:?}", config_path))
        }
    };

    // Validate configuration
    validate_config(&config).context("Configuration validation failed")?;

    // Compute config hash so deployments can be told apart in logs
    let config_json = serde_json::to_string(&config).context("Failed to serialize config")?;
    let config_hash = format!("{:x}", Sha256::digest(config_json.as_bytes()));

    info!("Configuration loaded successfully (hash {})", &config_hash[..16]);
    info!(
        "Priority weights: severity={} wait={}",
        config.triage.severity_weight, config.triage.wait_weight
    );
    info!("Agent roster: {:?}", config.agents.roster);

    // Create app state with an in-memory ticket store
    let addr = SocketAddr::new(config.server.host, config.server.port);
    let state = Arc::new(AppState::from_config(config));
    info!("Ticket store initialized");

    // Create router
    let app = create_router(state);

    // Start server
    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    // Run server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shut down; in-memory tickets discarded");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
