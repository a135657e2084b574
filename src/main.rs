//! Task Dashboard MCP Server - Main Entry Point
//!
//! The actual implementation is in the `taskdeck` library.

use anyhow::Result;
use clap::Parser;
use mcp_attr::server::serve_stdio;
use taskdeck::{Cli, Config, DataMode, TaskDeckHandler};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from(Cli::parse());

    // stdout carries the MCP protocol, so logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&config.log_filter)?)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    match &config.data {
        DataMode::Mock { latency } => info!(?latency, "Serving sample data"),
        DataMode::File { path, latency } => {
            info!(path = %path.display(), ?latency, "Serving data file")
        }
    }

    let handler = TaskDeckHandler::from_config(&config)?;
    serve_stdio(handler).await?;
    Ok(())
}
