//! CLI command implementations
//!
//! `serve` boots in a fixed order: logging, configuration, store, server.
//! Any failure before the listener is bound aborts startup.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tracing::{error, info};

use crate::config::{ConfigOverrides, ServiceConfig};
use crate::http_server::HttpServer;
use crate::observability::{init_logging, log_event, Event, LogFormat};
use crate::store::open_store;

use super::args::Command;
use super::errors::{CliError, CliResult};

/// Options for the `serve` command
#[derive(Debug, Clone, Default)]
pub struct ServeOptions {
    pub config: Option<PathBuf>,
    pub overrides: ConfigOverrides,
    pub log_format: LogFormat,
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
        Command::Serve {
            config,
            port,
            host,
            connection_string,
            log_format,
        } => serve(ServeOptions {
            config,
            overrides: ConfigOverrides {
                connection_string,
                host,
                port,
            },
            log_format,
        }),
        Command::CheckConfig { config } => check_config(config.as_deref()),
    }
}

/// Start the shoebox server and block until it shuts down
pub fn serve(options: ServeOptions) -> CliResult<()> {
    init_logging(options.log_format).map_err(CliError::logging_error)?;
    log_event(Event::BootStart);

    let result = boot_and_serve(options);
    if let Err(err) = &result {
        error!(
            event = %Event::BootFailed,
            code = err.code_str(),
            error = err.message(),
            "startup failed"
        );
    }
    result
}

fn boot_and_serve(options: ServeOptions) -> CliResult<()> {
    let config = ServiceConfig::load(options.config.as_deref(), options.overrides)?;
    info!(
        event = %Event::ConfigLoaded,
        connection_string = %config.connection_string,
        addr = %config.http.socket_addr(),
        "configuration resolved"
    );

    let store = open_store(&config.connection_string)?;
    info!(event = %Event::StoreOpened, backend = store.backend_name(), "store opened");

    let server = HttpServer::new(config.http, store);

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::server_error(format!("Failed to create tokio runtime: {}", e)))?;

    rt.block_on(async {
        server
            .start()
            .await
            .map_err(|e| CliError::server_error(format!("HTTP server failed: {}", e)))
    })
}

/// Resolve configuration and print it as JSON
pub fn check_config(config_path: Option<&Path>) -> CliResult<()> {
    let config = ServiceConfig::load(config_path, ConfigOverrides::default())?;
    write_config(&config, &mut io::stdout().lock())
}

fn write_config(config: &ServiceConfig, out: &mut impl Write) -> CliResult<()> {
    serde_json::to_writer_pretty(&mut *out, config)?;
    writeln!(out)?;
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_check_config_rejects_bad_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("shoebox.json");
        fs::write(&path, "{ not json").unwrap();

        let err = check_config(Some(&path)).unwrap_err();
        assert_eq!(err.code_str(), "SHOEBOX_CLI_CONFIG_ERROR");
    }

    #[test]
    fn test_check_config_accepts_complete_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("shoebox.json");
        fs::write(&path, r#"{"connection_string": "memory://", "port": 5001}"#).unwrap();

        let config =
            ServiceConfig::resolve(Some(&path), &HashMap::new(), ConfigOverrides::default())
                .unwrap();
        let mut out = Vec::new();
        write_config(&config, &mut out).unwrap();

        let printed: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(printed["connection_string"], "memory://");
        assert_eq!(printed["http"]["port"], 5001);
        assert_eq!(printed["http"]["host"], "0.0.0.0");
    }
}
