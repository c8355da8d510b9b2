//! BigQuery MCP Server Library
//!
//! This crate provides a Model Context Protocol (MCP) server that gives
//! agents read-only, allowlisted access to BigQuery metadata: table
//! listings, table schemas and query dry runs.
//!
//! # Architecture
//!
//! The server is organized into the following modules:
//!
//! - **cli**: The `start` command and its options
//! - **core**: Core infrastructure including configuration, error handling,
//!   the dataset allowlist, the warehouse client, and the main server
//! - **domains**: Business logic organized by bounded contexts
//!   - **tools**: MCP tools that can be executed by clients
//!
//! # Example
//!
//! ```rust,no_run
//! use bigquery_mcp_server::{Config, McpServer};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::new()
//!         .with_project("analytics-prod")
//!         .with_datasets(["sales"]);
//!     let server = McpServer::connect(config).await?;
//!     server.serve().await?;
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod core;
pub mod domains;

// Re-export commonly used types for convenience
pub use core::{Config, Error, McpServer, Result};
