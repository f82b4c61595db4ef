//! Service configuration
//!
//! Resolved once at startup and handed to the store opener and the HTTP
//! server. Sources, lowest to highest precedence:
//!
//! 1. built-in defaults
//! 2. JSON config file (`--config`)
//! 3. environment: `DB_CONNECTION_STRING` (or the older
//!    `MONGO_DB_CONNECTION_STRING`), `HOST`, `PORT`
//! 4. explicit command-line flags
//!
//! ```json
//! {
//!   "connection_string": "file:///var/lib/shoebox/shoes.log",
//!   "host": "127.0.0.1",
//!   "port": 5000,
//!   "cors_origins": ["http://localhost:3000"]
//! }
//! ```

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::http_server::HttpServerConfig;
use crate::store::StoreLocation;

pub const ENV_CONNECTION_STRING: &str = "DB_CONNECTION_STRING";
/// Older name, read only when `DB_CONNECTION_STRING` is unset
pub const ENV_CONNECTION_STRING_LEGACY: &str = "MONGO_DB_CONNECTION_STRING";
pub const ENV_HOST: &str = "HOST";
pub const ENV_PORT: &str = "PORT";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid config JSON in {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("no connection string: set DB_CONNECTION_STRING, --connection-string, or connection_string in the config file")]
    MissingConnectionString,

    #[error("unsupported connection string {0:?}: expected memory:// or file://<path>")]
    UnsupportedConnectionString(String),

    #[error("invalid port {0:?}: expected an integer between 1 and 65535")]
    InvalidPort(String),
}

/// Keys accepted in the JSON config file; all optional
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    connection_string: Option<String>,
    host: Option<String>,
    port: Option<u16>,
    cors_origins: Option<Vec<String>>,
}

/// Values given explicitly on the command line
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub connection_string: Option<String>,
    pub host: Option<String>,
    pub port: Option<u16>,
}

/// Fully resolved and validated service configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceConfig {
    /// Persistence backend location (`memory://` or `file://<path>`)
    pub connection_string: String,
    pub http: HttpServerConfig,
}

impl ServiceConfig {
    /// Resolve from the process environment
    pub fn load(file: Option<&Path>, overrides: ConfigOverrides) -> Result<Self, ConfigError> {
        let env: HashMap<String, String> = std::env::vars().collect();
        Self::resolve(file, &env, overrides)
    }

    /// Resolve from explicit sources and validate
    pub fn resolve(
        file: Option<&Path>,
        env: &HashMap<String, String>,
        overrides: ConfigOverrides,
    ) -> Result<Self, ConfigError> {
        let file_config = match file {
            Some(path) => read_config_file(path)?,
            None => ConfigFile::default(),
        };

        let mut http = HttpServerConfig::default();
        if let Some(host) = file_config.host {
            http.host = host;
        }
        if let Some(port) = file_config.port {
            http.port = port;
        }
        if let Some(origins) = file_config.cors_origins {
            http.cors_origins = origins;
        }
        let mut connection_string = file_config.connection_string;

        if let Some(value) = env_value(env, ENV_CONNECTION_STRING)
            .or_else(|| env_value(env, ENV_CONNECTION_STRING_LEGACY))
        {
            connection_string = Some(value.to_string());
        }
        if let Some(value) = env_value(env, ENV_HOST) {
            http.host = value.to_string();
        }
        if let Some(value) = env_value(env, ENV_PORT) {
            http.port = parse_port(value)?;
        }

        if let Some(value) = overrides.connection_string {
            connection_string = Some(value);
        }
        if let Some(host) = overrides.host {
            http.host = host;
        }
        if let Some(port) = overrides.port {
            http.port = port;
        }

        let config = Self {
            connection_string: connection_string
                .filter(|s| !s.trim().is_empty())
                .ok_or(ConfigError::MissingConnectionString)?,
            http,
        };
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        StoreLocation::parse(&self.connection_string)
            .map_err(|_| ConfigError::UnsupportedConnectionString(self.connection_string.clone()))?;

        if self.http.port == 0 {
            return Err(ConfigError::InvalidPort("0".to_string()));
        }
        Ok(())
    }
}

fn read_config_file(path: &Path) -> Result<ConfigFile, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Empty variables count as unset
fn env_value<'a>(env: &'a HashMap<String, String>, key: &str) -> Option<&'a str> {
    env.get(key).map(|v| v.trim()).filter(|v| !v.is_empty())
}

fn parse_port(value: &str) -> Result<u16, ConfigError> {
    match value.parse::<u16>() {
        Ok(port) if port != 0 => Ok(port),
        _ => Err(ConfigError::InvalidPort(value.to_string())),
    }
}
