//! Core module containing shared infrastructure components.
//!
//! This module provides the foundational building blocks for the MCP server,
//! including error handling, configuration, the dataset allowlist, the
//! warehouse client, server lifecycle management, and the stdio transport.

pub mod config;
pub mod error;
pub mod security;
pub mod server;
pub mod transport;
pub mod warehouse;

pub use config::Config;
pub use error::{Error, Result};
pub use security::{AllowlistGuard, DatasetNotAllowed};
pub use server::{McpServer, ServerState};
pub use transport::{StdioTransport, TransportError};
