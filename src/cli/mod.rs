//! CLI module for rosterdb
//!
//! Provides command-line interface for:
//! - init: Create an empty roster document
//! - start: Load the roster and enter the serving loop

mod args;
mod commands;
mod errors;

pub use args::{Cli, Command};
pub use commands::{init, run, run_command, start, Config};
pub use errors::{CliError, CliErrorCode, CliResult};
