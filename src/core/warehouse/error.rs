//! Warehouse adapter error types.

use thiserror::Error;

/// Result type for warehouse operations.
pub type WarehouseResult<T> = Result<T, WarehouseError>;

/// Errors reported by a warehouse client.
#[derive(Debug, Error)]
pub enum WarehouseError {
    /// The HTTP request could not be sent or its body could not be read.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The warehouse answered with a non-success status.
    #[error("BigQuery API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// No usable access token could be obtained.
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// The warehouse answered with a body we could not interpret.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// The client was configured with unusable settings.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl WarehouseError {
    /// Create an API error.
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    /// Create an authentication error.
    pub fn auth(msg: impl Into<String>) -> Self {
        Self::Auth(msg.into())
    }

    /// Create an invalid response error.
    pub fn invalid_response(msg: impl Into<String>) -> Self {
        Self::InvalidResponse(msg.into())
    }

    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
