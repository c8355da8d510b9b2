//! Command line interface.
//!
//! `bigquery-mcp-server start --project <ID> --dataset <D>...` starts the
//! server. Every option can also come from an `MCP_*` environment variable.

use clap::{Args, Parser, Subcommand};

use crate::core::config::{Config, DEFAULT_REQUEST_TIMEOUT_SECS};
use crate::core::warehouse::bigquery::{DEFAULT_ENDPOINT, DEFAULT_LOCATION};
use crate::core::{Error, Result};

#[derive(Parser, Debug)]
#[command(
    name = "bigquery-mcp-server",
    version,
    about = "MCP server exposing allowlisted BigQuery datasets"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the MCP BigQuery server
    Start(StartArgs),
}

#[derive(Args, Debug, Clone)]
pub struct StartArgs {
    /// Project ID
    #[arg(long, env = "MCP_BIGQUERY_PROJECT")]
    pub project: String,

    /// Allowed dataset (repeat for several)
    #[arg(
        long = "dataset",
        env = "MCP_BIGQUERY_DATASETS",
        value_delimiter = ',',
        required = true
    )]
    pub datasets: Vec<String>,

    /// Location for query jobs
    #[arg(long, env = "MCP_BIGQUERY_LOCATION", default_value = DEFAULT_LOCATION)]
    pub location: String,

    /// OAuth2 access token (defaults to `gcloud auth print-access-token`)
    #[arg(long, env = "MCP_BIGQUERY_ACCESS_TOKEN", hide_env_values = true)]
    pub access_token: Option<String>,

    /// BigQuery REST API base URL
    #[arg(long, env = "MCP_BIGQUERY_ENDPOINT", default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,

    /// Upper bound in seconds on a single warehouse call
    #[arg(
        long = "request-timeout",
        env = "MCP_REQUEST_TIMEOUT",
        default_value_t = DEFAULT_REQUEST_TIMEOUT_SECS
    )]
    pub request_timeout_secs: u64,

    /// Do not expose the list_allowed_datasets tool
    #[arg(long)]
    pub no_list_allowed_datasets: bool,

    /// Do not expose the dry_run_query tool
    #[arg(long)]
    pub no_dry_run: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "MCP_LOG_LEVEL", default_value = "info")]
    pub log_level: String,
}

impl StartArgs {
    /// Turn parsed options into a server configuration.
    pub fn into_config(self) -> Result<Config> {
        if self.request_timeout_secs == 0 {
            return Err(Error::config("request timeout must be at least one second"));
        }

        let access_token = self
            .access_token
            .or_else(|| std::env::var("GOOGLE_OAUTH_ACCESS_TOKEN").ok())
            .filter(|t| !t.trim().is_empty());

        let mut config = Config::new()
            .with_project(self.project)
            .with_datasets(self.datasets);
        config.warehouse.location = self.location;
        config.warehouse.endpoint = self.endpoint;
        config.warehouse.access_token = access_token;
        config.warehouse.request_timeout_secs = self.request_timeout_secs;
        config.catalog.list_allowed_datasets = !self.no_list_allowed_datasets;
        config.catalog.dry_run_query = !self.no_dry_run;
        config.logging.level = self.log_level;

        Ok(config)
    }
}
