//! Configuration management for the MCP server.
//!
//! This module provides a centralized configuration structure. It is
//! normally populated from the `start` command line (see [`crate::cli`]),
//! whose options fall back to `MCP_*` environment variables and `.env` files.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::warehouse::bigquery::{DEFAULT_ENDPOINT, DEFAULT_LOCATION};

/// Default upper bound on a single warehouse call.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;

/// Main configuration structure for the MCP server.
///
/// This struct contains all configurable aspects of the server, organized
/// by concern.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Warehouse connection settings.
    pub warehouse: WarehouseConfig,

    /// Which optional tools are exposed.
    pub catalog: CatalogConfig,

    /// Datasets the tools are allowed to touch, in configured order.
    pub datasets: Vec<String>,
}

/// Server identification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The name of the server as reported to clients.
    pub name: String,

    /// The version of the server.
    pub version: String,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,
}

/// BigQuery connection settings.
#[derive(Clone, Serialize, Deserialize)]
pub struct WarehouseConfig {
    /// Project that owns the datasets and runs dry-run jobs.
    pub project: String,

    /// Location (region or multi-region) for query jobs.
    pub location: String,

    /// Base URL of the BigQuery REST API.
    pub endpoint: String,

    /// OAuth2 access token. When absent, one is obtained from gcloud.
    pub access_token: Option<String>,

    /// Upper bound, in seconds, on a single warehouse call.
    pub request_timeout_secs: u64,
}

/// Custom Debug implementation to redact secrets from logs.
impl std::fmt::Debug for WarehouseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WarehouseConfig")
            .field("project", &self.project)
            .field("location", &self.location)
            .field("endpoint", &self.endpoint)
            .field(
                "access_token",
                &self.access_token.as_ref().map(|_| "[REDACTED]"),
            )
            .field("request_timeout_secs", &self.request_timeout_secs)
            .finish()
    }
}

impl WarehouseConfig {
    /// The request timeout as a [`Duration`].
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Switches for the optional tools.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Expose `list_allowed_datasets`.
    pub list_allowed_datasets: bool,

    /// Expose `dry_run_query`.
    pub dry_run_query: bool,
}

impl Default for WarehouseConfig {
    fn default() -> Self {
        Self {
            project: String::new(),
            location: DEFAULT_LOCATION.to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            access_token: None,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            list_allowed_datasets: true,
            dry_run_query: true,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                name: "bigquery-server".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
            },
            warehouse: WarehouseConfig::default(),
            catalog: CatalogConfig::default(),
            datasets: Vec::new(),
        }
    }
}

impl Config {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the warehouse project.
    pub fn with_project(mut self, project: impl Into<String>) -> Self {
        self.warehouse.project = project.into();
        self
    }

    /// Set the allowed datasets.
    pub fn with_datasets<I, S>(mut self, datasets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.datasets = datasets.into_iter().map(Into::into).collect();
        self
    }
}
