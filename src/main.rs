//! MCP Server Entry Point
//!
//! This is the main entry point for the MCP server. It parses the command
//! line, initializes logging, connects to BigQuery and serves over stdio.

use anyhow::Result;
use clap::Parser;
use tracing::{Level, error, info};
use tracing_subscriber::{EnvFilter, fmt};

use bigquery_mcp_server::McpServer;
use bigquery_mcp_server::cli::{Cli, Command};

#[tokio::main]
async fn main() -> Result<()> {
    // Pick up MCP_* variables from a local .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Command::Start(args) => {
            let config = args.into_config()?;

            // Initialize logging
            init_logging(&config.logging.level);

            info!("Starting {} v{}", config.server.name, config.server.version);
            info!(
                "Project: {}, location: {}, allowed datasets: {}",
                config.warehouse.project,
                config.warehouse.location,
                config.datasets.join(", ")
            );

            let server = McpServer::connect(config)
                .await
                .inspect_err(|e| error!("Failed to create server: {}", e))?;

            info!("Server initialized");

            server
                .serve()
                .await
                .inspect_err(|e| error!("Server error: {}", e))?;

            info!("Server shutting down");
        }
    }

    Ok(())
}

/// Initialize the logging subsystem.
///
/// Logs go to stderr; stdout is reserved for MCP messages.
fn init_logging(level: &str) {
    let level = match level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr)
        .init();
}
