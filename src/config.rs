//! Configuration manager for Roster.

use std::fs::File;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use axum::extract::FromRef;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::AppState;

const DEFAULT_CONFIG_PATH: &str = "config.yaml";
const DEFAULT_NAME: &str = "roster";
const DEFAULT_PORT: u16 = 5000;
const DEFAULT_TIMEOUT: u64 = 10;
const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Configuration {
    /// Instance name.
    pub name: String,
    /// Public base URL of current instance.
    #[serde(skip_serializing)]
    pub url: String,
    #[serde(skip_deserializing)]
    pub version: String,
    /// Listening address.
    #[serde(skip_serializing)]
    pub address: IpAddr,
    /// Listening port. `PORT` environment variable wins.
    #[serde(skip_serializing)]
    pub port: u16,
    /// Load sample users on start.
    #[serde(skip_serializing)]
    pub seed: bool,
    /// Refuse two users sharing the same email.
    #[serde(skip_serializing)]
    pub unique_email: bool,
    /// Seconds before a request is answered with `408`.
    #[serde(skip_serializing)]
    pub request_timeout: u64,
    /// Related to metrics and OTLP export.
    #[serde(skip_serializing)]
    pub telemetry: Telemetry,
    #[serde(skip)]
    path: PathBuf,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            name: DEFAULT_NAME.to_owned(),
            url: String::default(),
            version: VERSION.to_owned(),
            address: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
            seed: true,
            unique_email: true,
            request_timeout: DEFAULT_TIMEOUT,
            telemetry: Telemetry::default(),
            path: PathBuf::default(),
        }
    }
}

/// Telemetry configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Telemetry {
    /// Expose `/metrics` in Prometheus format.
    pub prometheus: bool,
    /// gRPC endpoint receiving traces and logs.
    pub otlp_endpoint: Option<String>,
}

impl Default for Telemetry {
    fn default() -> Self {
        Self {
            prometheus: true,
            otlp_endpoint: None,
        }
    }
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

    /// Address the HTTP server binds to.
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.address, self.port)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout)
    }

    /// Normalizes a URL string by ensuring it starts with a valid scheme
    /// (`http` or `https`).
    fn normalize_url(&self, url: &str) -> Result<String, url::ParseError> {
        let url_with_scheme =
            if url.starts_with("http://") || url.starts_with("https://") {
                url.to_string()
            } else {
                format!("https://{url}")
            };

        let parsed_url = Url::parse(&url_with_scheme)?;
        Ok(parsed_url.to_string())
    }

    /// Reads the `config.yaml` file from the specified path or the default
    /// location.
    pub fn read(self) -> Result<Arc<Self>, url::ParseError> {
        let file_path = if self.path.is_file() {
            &self.path
        } else {
            &Path::new(DEFAULT_CONFIG_PATH).to_path_buf()
        };

        let mut config = match File::open(file_path) {
            Ok(file) => match serde_yaml::from_reader::<_, Configuration>(file) {
                Ok(config) => config,
                Err(err) => self.error(err),
            },
            Err(err) => self.error(err),
        };

        config.version = VERSION.to_owned();
        if !config.url.is_empty() {
            config.url = self.normalize_url(&config.url)?;
        }
        if let Some(port) = std::env::var("PORT")
            .ok()
            .and_then(|port| port.parse::<u16>().ok())
        {
            config.port = port;
        }

        Ok(Arc::new(config))
    }

    /// Return a default configuration as fallback.
    fn error(&self, err: impl std::error::Error) -> Self {
        tracing::error!(error = %err, "`config.yaml` file cannot be read, using defaults");
        Self::default()
    }
}
