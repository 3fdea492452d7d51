use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "unisync", version, about = "University directory sync service")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Start the HTTP server (default if no subcommand given).
    Serve {
        #[arg(long, default_value = "0.0.0.0")]
        host: String,
        #[arg(long, default_value = "5000")]
        port: u16,

        /// Local data directory (SQLite store).
        #[arg(long, env = "UNISYNC_DATA_DIR", default_value = ".unisync_dev")]
        data_dir: PathBuf,
    },

    /// Run one ingestion for a country and exit.
    Ingest {
        /// Country to synchronize, e.g. "India".
        country: String,

        #[arg(long, env = "UNISYNC_DATA_DIR", default_value = ".unisync_dev")]
        data_dir: PathBuf,
    },

    /// Print resolved configuration.
    Config,

    /// Health check the configured store.
    Check {
        #[arg(long, env = "UNISYNC_DATA_DIR", default_value = ".unisync_dev")]
        data_dir: PathBuf,
    },
}
