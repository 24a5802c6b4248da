//! Progress Reconciler (revq-pr) - Main entry point
//!
//! HTTP service that receives "submission accepted" events from the
//! browser-side observer and updates review tracking in Notion.

use std::net::SocketAddr;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::signal;
use tracing::info;

use revq_common::config::load_toml_config;
use revq_pr::config::Config;
use revq_pr::{build_router, AppState};

/// Command-line arguments for revq-pr
#[derive(Parser, Debug)]
#[command(name = "revq-pr")]
#[command(about = "Progress Reconciler service for revq")]
#[command(version)]
struct Args {
    /// Port to listen on
    #[arg(short, long, env = "REVQ_PORT")]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Honor a .env file in the working directory
    dotenvy::dotenv().ok();

    // Initialize tracing subscriber
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "revq_pr=debug,tower_http=debug".into()),
        )
        .init();

    // Log build identification immediately after tracing init
    info!(
        "Starting revq Progress Reconciler (revq-pr) v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    let args = Args::parse();

    let toml_config = load_toml_config().unwrap_or_else(|e| {
        tracing::warn!("Config file ignored: {}", e);
        Default::default()
    });
    let config = Config::resolve(args.port, &toml_config);

    info!(
        "Title variation fallback: {}",
        if config.title_variations {
            "enabled"
        } else {
            "disabled"
        }
    );

    let port = config.port;
    let state = AppState::from_config(config)?;
    let app = build_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;

    info!("revq-pr listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}
