//! # Graphiti MCP Bridge
//!
//! Entry point for the MCP stdio bridge to the Graphiti HTTP server.
//!
//! Reads configuration from (lowest to highest precedence):
//! - built-in defaults (`http://localhost:8000`, 10 s timeout)
//! - `--config <file>` (TOML, `[backend]` table)
//! - `MCP_SERVER_URL`, `MCP_TIMEOUT_SECS`
//! - `--url`, `--timeout-secs`
//!
//! Logging goes to stderr; stdout is reserved for the MCP transport.
//! `GRAPHITI_BRIDGE_LOG_FORMAT=json` switches to JSON log lines.

mod cli;

use clap::Parser;
use graphiti_bridge_core::{Bridge, BridgeConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let cli = cli::Cli::parse();
    let config = BridgeConfig::load(cli.config.as_deref(), cli.overrides())?;

    tracing::info!(
        target_url = %config.base_url,
        timeout_secs = config.timeout.as_secs(),
        "Graphiti MCP bridge starting"
    );

    let mut bridge = Bridge::from_config(&config, tokio::io::stdout())?;

    tokio::select! {
        result = bridge.run(tokio::io::stdin()) => {
            result.inspect_err(|e| tracing::error!("bridge stopped: {}", e))?;
        }
        () = shutdown_signal() => {
            tracing::info!("signal received, exiting");
            // The blocking stdin reader would otherwise hold up runtime shutdown.
            std::process::exit(0);
        }
    }

    Ok(())
}

/// Logging to stderr only, without ANSI colours.
fn init_tracing() {
    let log_format =
        std::env::var("GRAPHITI_BRIDGE_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "graphiti_mcp_bridge=info,graphiti_bridge_core=info".into());

    match log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_writer(std::io::stderr),
                )
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_writer(std::io::stderr)
                        .with_ansi(false),
                )
                .init();
        }
    }
}

/// Resolves on Ctrl-C, or SIGTERM on unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!("cannot listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::warn!("cannot listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }
}
