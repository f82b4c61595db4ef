//! CLI module for shoebox
//!
//! Provides command-line interface for:
//! - serve: Resolve config, open the store, and run the HTTP server
//! - check-config: Print the resolved configuration and exit

mod args;
mod commands;
mod errors;

pub use args::{Cli, Command};
pub use commands::{check_config, run, run_command, serve, ServeOptions};
pub use errors::{CliError, CliErrorCode, CliResult};
