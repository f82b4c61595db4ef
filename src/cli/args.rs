//! CLI argument definitions using clap
//!
//! Commands:
//! - shoebox serve [--config <path>] [--port <n>] [--connection-string <s>]
//! - shoebox check-config [--config <path>]

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::observability::LogFormat;

/// shoebox - a small CRUD service for a shoe catalogue
#[derive(Parser, Debug)]
#[command(name = "shoebox")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the HTTP server
    Serve {
        /// Path to a JSON configuration file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Listen port (overrides PORT)
        #[arg(long)]
        port: Option<u16>,

        /// Listen host (overrides HOST)
        #[arg(long)]
        host: Option<String>,

        /// memory:// or file://<path> (overrides DB_CONNECTION_STRING)
        #[arg(long)]
        connection_string: Option<String>,

        /// Log output format
        #[arg(long, value_enum, default_value_t = LogFormat::Json)]
        log_format: LogFormat,
    },

    /// Resolve and validate configuration, print it as JSON, and exit
    CheckConfig {
        /// Path to a JSON configuration file
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serve_defaults() {
        let cli = Cli::try_parse_from(["shoebox", "serve"]).unwrap();
        match cli.command {
            Command::Serve {
                config,
                port,
                connection_string,
                log_format,
                ..
            } => {
                assert!(config.is_none());
                assert!(port.is_none());
                assert!(connection_string.is_none());
                assert_eq!(log_format, LogFormat::Json);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_serve_flags() {
        let cli = Cli::try_parse_from([
            "shoebox",
            "serve",
            "--port",
            "8080",
            "--connection-string",
            "memory://",
            "--log-format",
            "pretty",
        ])
        .unwrap();
        match cli.command {
            Command::Serve {
                port,
                connection_string,
                log_format,
                ..
            } => {
                assert_eq!(port, Some(8080));
                assert_eq!(connection_string.as_deref(), Some("memory://"));
                assert_eq!(log_format, LogFormat::Pretty);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_bad_port_rejected() {
        assert!(Cli::try_parse_from(["shoebox", "serve", "--port", "70000"]).is_err());
    }

    #[test]
    fn test_check_config() {
        let cli = Cli::try_parse_from(["shoebox", "check-config", "--config", "a.json"]).unwrap();
        assert!(matches!(cli.command, Command::CheckConfig { config: Some(_) }));
    }
}
