//! CLI command implementations
//!
//! `init` creates an empty roster document and exits; `start` loads the
//! configuration, opens the store, and serves until interrupted. Missing
//! configuration files are not an error: every setting has a default, so
//! `rosterdb start` works out of the box.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::http_server::{HttpServer, HttpServerConfig};
use crate::store::{save_roster, CharacterStore};

use super::args::Command;
use super::errors::{CliError, CliResult};

/// Configuration file structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Path of the roster document
    #[serde(default = "default_data_file")]
    pub data_file: String,

    /// HTTP server settings
    #[serde(default)]
    pub server: HttpServerConfig,
}

fn default_data_file() -> String {
    "./characters.json".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_file: default_data_file(),
            server: HttpServerConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from file, falling back to defaults when the
    /// file does not exist.
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Config::default());
            }
            Err(e) => {
                return Err(CliError::config_error(format!(
                    "Failed to read config {}: {}",
                    path.display(),
                    e
                )))
            }
        };

        let config: Config = serde_json::from_str(&content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration
    fn validate(&self) -> CliResult<()> {
        if self.data_file.is_empty() {
            return Err(CliError::config_error("data_file must not be empty"));
        }

        Ok(())
    }

    /// Get the roster document path
    pub fn data_path(&self) -> &Path {
        Path::new(&self.data_file)
    }
}

/// Main CLI entry point
///
/// Parses arguments and dispatches to the appropriate command.
/// This is the only function that main.rs should call.
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Init { config } => init(&config),
        Command::Start { config, port } => start(&config, port),
    }
}

/// Create an empty roster document at the configured path.
///
/// Refuses to touch an existing document; `init` never overwrites data.
pub fn init(config_path: &Path) -> CliResult<()> {
    let config = Config::load(config_path)?;
    let data_path = config.data_path();

    if data_path.exists() {
        return Err(CliError::already_initialized(data_path.display()));
    }

    if let Some(parent) = data_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| {
                CliError::io_error(format!(
                    "Failed to create directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }

    save_roster(data_path, &[])
        .map_err(|e| CliError::io_error(format!("Failed to write roster document: {}", e)))?;

    println!("{}", serde_json::json!({"initialized": true, "data_file": config.data_file}));

    Ok(())
}

/// Load the roster and serve it over HTTP.
///
/// A missing or malformed roster document degrades to an empty
/// collection (the store logs the diagnostic); it never aborts startup.
pub fn start(config_path: &Path, port_override: Option<u16>) -> CliResult<()> {
    let mut config = Config::load(config_path)?;

    if let Some(port) = port_override {
        config.server.port = port;
    }

    let store = Arc::new(CharacterStore::open(config.data_path()));
    let server = HttpServer::with_config(config.server, store);

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::boot_failed(format!("Failed to create tokio runtime: {}", e)))?;

    rt.block_on(async {
        server
            .start()
            .await
            .map_err(|e| CliError::boot_failed(format!("HTTP server failed: {}", e)))
    })?;

    Ok(())
}
