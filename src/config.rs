//! Command-line and environment configuration

use crate::storage::Storage;
use crate::store::MemoryStore;
use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

/// Task dashboard MCP server
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to a TOML data file; changes are saved after every mutation
    #[arg(long, env = "TASKDECK_DATA")]
    pub data: Option<PathBuf>,

    /// Serve the in-memory sample data even when a data file is configured
    #[arg(long)]
    pub mock: bool,

    /// Artificial delay before every data call, in milliseconds
    #[arg(long, env = "TASKDECK_LATENCY_MS", default_value_t = 0)]
    pub latency_ms: u64,

    /// Log filter, e.g. "info" or "taskdeck=debug"
    #[arg(long, env = "TASKDECK_LOG", default_value = "info")]
    pub log_level: String,
}

/// Where the server's records come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataMode {
    /// Fixture-seeded, in memory only
    Mock { latency: Duration },
    /// Loaded from and saved to a TOML file
    File { path: PathBuf, latency: Duration },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub data: DataMode,
    pub log_filter: String,
}

impl From<Cli> for Config {
    fn from(cli: Cli) -> Self {
        let latency = Duration::from_millis(cli.latency_ms);
        let data = match cli.data {
            Some(path) if !cli.mock => DataMode::File { path, latency },
            _ => DataMode::Mock { latency },
        };
        Self {
            data,
            log_filter: cli.log_level,
        }
    }
}

impl Config {
    /// Build the data source described by this configuration
    pub fn build_store(&self) -> Result<MemoryStore> {
        let store = match &self.data {
            DataMode::Mock { latency } => MemoryStore::with_fixtures()?.with_latency(*latency),
            DataMode::File { path, latency } => {
                MemoryStore::open(Storage::new(path))?.with_latency(*latency)
            }
        };
        Ok(store)
    }
}
