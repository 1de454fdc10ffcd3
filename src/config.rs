//! Configuration manager for the account service.

use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum::extract::FromRef;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::AppState;

const DEFAULT_CONFIG_PATH: &str = "config.yaml";
const DEFAULT_PORT: u16 = 8080;
const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct Configuration {
    /// Instance name.
    #[serde(default)]
    pub name: String,
    /// Listening port, `PORT` environment variable takes precedence.
    pub port: Option<u16>,
    #[serde(default)]
    version: String,
    #[serde(skip)]
    path: PathBuf,
    /// Related to PostgreSQL configuration.
    /// Profiles are kept in memory when missing.
    #[serde(skip_serializing)]
    pub postgres: Option<Postgres>,
    /// Related to CORS policy.
    #[serde(default)]
    pub cors: Cors,
    /// Related to Prometheus metrics.
    #[serde(default)]
    pub metrics: bool,
}

/// PostgreSQL configuration.
#[derive(Debug, Default, PartialEq, Clone, Serialize, Deserialize)]
pub struct Postgres {
    /// Hostname:(?port) for PostgreSQL instance.
    pub address: String,
    /// Database name.
    pub database: Option<String>,
    /// Username credential to connect.
    pub username: Option<String>,
    /// Password credential to connect.
    pub password: Option<String>,
    /// Maximum pool connections.
    pub pool_size: Option<u32>,
}

/// Cross-origin configuration.
#[derive(Debug, Default, PartialEq, Clone, Serialize, Deserialize)]
pub struct Cors {
    /// Origins allowed to call the API. Any origin when empty.
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

impl FromRef<AppState> for Arc<Configuration> {
    fn from_ref(state: &AppState) -> Arc<Configuration> {
        Arc::clone(&state.config)
    }
}

impl Configuration {
    pub fn path(mut self, path: PathBuf) -> Self {
        self.path = path;
        self
    }

    /// Port to listen on.
    pub fn port(&self) -> u16 {
        std::env::var("PORT")
            .ok()
            .and_then(|port| port.parse().ok())
            .or(self.port)
            .unwrap_or(DEFAULT_PORT)
    }

    /// Serialize an origin as `scheme://host(:port)`, adding `https` when no
    /// scheme is given.
    fn normalize_origin(&self, origin: &str) -> Result<String, url::ParseError> {
        let url_with_scheme =
            if origin.starts_with("http://") || origin.starts_with("https://") {
                origin.to_string()
            } else {
                format!("https://{origin}")
            };

        let parsed_url = Url::parse(&url_with_scheme)?;
        Ok(parsed_url.origin().ascii_serialization())
    }

    /// Reads the `config.yaml` file from the specified path or the default
    /// location.
    pub fn read(self) -> Result<Arc<Self>, url::ParseError> {
        let file_path = if self.path.is_file() {
            &self.path
        } else {
            &Path::new(DEFAULT_CONFIG_PATH).to_path_buf()
        };

        match File::open(file_path) {
            Ok(file) => match serde_yaml::from_reader(file) {
                Ok(config) => Ok(Arc::new(self.finalize(config)?)),
                Err(err) => Ok(Arc::new(self.error(err))),
            },
            Err(err) => Ok(Arc::new(self.error(err))),
        }
    }

    /// Set version and normalize origins.
    fn finalize(&self, mut config: Configuration) -> Result<Self, url::ParseError> {
        config.version = VERSION.to_owned();
        config.cors.allowed_origins = config
            .cors
            .allowed_origins
            .iter()
            .map(|origin| self.normalize_origin(origin))
            .collect::<Result<_, _>>()?;

        Ok(config)
    }

    /// Return a default configuration as fallback.
    fn error(&self, err: impl std::error::Error) -> Self {
        tracing::error!(error = %err, "`config.yaml` file not found or invalid");
        Self {
            version: VERSION.to_owned(),
            ..Default::default()
        }
    }
}
