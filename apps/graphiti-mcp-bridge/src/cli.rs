//! # Command Line
//!
//! Flags override `MCP_SERVER_URL` / `MCP_TIMEOUT_SECS` and the optional
//! configuration file.

use clap::Parser;
use graphiti_bridge_core::ConfigOverrides;
use std::path::PathBuf;

/// Graphiti MCP bridge
///
/// Speaks MCP over stdin/stdout and forwards tool calls to the Graphiti
/// HTTP server.
#[derive(Parser, Debug)]
#[command(name = "graphiti-mcp-bridge")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Base URL of the Graphiti MCP HTTP server
    #[arg(short, long)]
    pub url: Option<String>,

    /// Seconds to wait for a backend answer
    #[arg(short, long)]
    pub timeout_secs: Option<u64>,

    /// TOML configuration file with a [backend] table
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

impl Cli {
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            url: self.url.clone(),
            timeout_secs: self.timeout_secs,
        }
    }
}
