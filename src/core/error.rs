//! Error types and handling for the MCP server.
//!
//! This module defines a unified error type that can represent errors from
//! all layers, providing consistent error handling across the application.
//! Only startup errors ever reach `main`; per-request failures are turned
//! into tool results by the dispatcher.

use thiserror::Error;

use super::transport::TransportError;

/// A specialized Result type for MCP server operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for the MCP server.
#[derive(Debug, Error)]
pub enum Error {
    /// Error originating from the tools domain.
    #[error("Tool error: {0}")]
    Tool(#[from] crate::domains::tools::ToolError),

    /// Error from the transport layer.
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// Fatal failure while bringing the server up.
    #[error("Startup failed: {0}")]
    Startup(String),

    /// Configuration-related errors.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Create a new startup error.
    pub fn startup(msg: impl Into<String>) -> Self {
        Self::Startup(msg.into())
    }

    /// Create a new configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
