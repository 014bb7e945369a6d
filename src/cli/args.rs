//! CLI argument definitions using clap
//!
//! Commands:
//! - rosterdb init --config <path>
//! - rosterdb start --config <path>

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// rosterdb - A small, file-backed character roster served over HTTP
#[derive(Parser, Debug)]
#[command(name = "rosterdb")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create an empty roster document
    Init {
        /// Path to configuration file
        #[arg(long, default_value = "./rosterdb.json")]
        config: PathBuf,
    },

    /// Start the rosterdb server
    Start {
        /// Path to configuration file
        #[arg(long, default_value = "./rosterdb.json")]
        config: PathBuf,

        /// Override the configured port
        #[arg(long)]
        port: Option<u16>,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
