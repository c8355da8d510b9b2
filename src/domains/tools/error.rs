//! Tool-specific error types.

use std::time::Duration;

use thiserror::Error;

use crate::core::security::DatasetNotAllowed;
use crate::core::warehouse::WarehouseError;

/// Errors that can occur during tool registration or a tool call.
///
/// Every variant except [`ToolError::DuplicateTool`] is reported back to the
/// caller as a tool-level error result; none of them stops the server.
#[derive(Debug, Error)]
pub enum ToolError {
    /// The requested tool was not found.
    #[error("Tool not found: {0}")]
    NotFound(String),

    /// A parameter was missing or had the wrong kind.
    #[error("Invalid argument '{parameter}': {reason}")]
    InvalidArgument { parameter: String, reason: String },

    /// The dataset is outside the configured allowlist.
    #[error(transparent)]
    DatasetNotAllowed(#[from] DatasetNotAllowed),

    /// The warehouse call failed.
    #[error("Upstream error: {0}")]
    Upstream(String),

    /// A tool with the same name is already registered.
    #[error("Tool already registered: {0}")]
    DuplicateTool(String),

    /// The warehouse call did not finish in time.
    #[error("Tool execution timed out after {}s", .0.as_secs())]
    Timeout(Duration),

    /// The caller cancelled the request.
    #[error("Tool call cancelled by the client")]
    Cancelled,

    /// An internal error occurred.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ToolError {
    /// Create a new "not found" error.
    pub fn not_found(name: impl Into<String>) -> Self {
        Self::NotFound(name.into())
    }

    /// Create a new "invalid argument" error.
    pub fn invalid_argument(parameter: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            parameter: parameter.into(),
            reason: reason.into(),
        }
    }

    /// Create a new "upstream" error.
    pub fn upstream(msg: impl Into<String>) -> Self {
        Self::Upstream(msg.into())
    }

    /// Create a new "internal" error.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}

impl From<WarehouseError> for ToolError {
    fn from(error: WarehouseError) -> Self {
        Self::Upstream(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_failing_condition() {
        assert_eq!(
            ToolError::invalid_argument("table", "missing required parameter").to_string(),
            "Invalid argument 'table': missing required parameter"
        );
        assert_eq!(
            ToolError::from(DatasetNotAllowed {
                dataset: "finance".to_string()
            })
            .to_string(),
            "Dataset 'finance' is not allowed"
        );
        assert_eq!(
            ToolError::not_found("drop_table").to_string(),
            "Tool not found: drop_table"
        );
        assert_eq!(
            ToolError::Timeout(Duration::from_secs(30)).to_string(),
            "Tool execution timed out after 30s"
        );
    }

    #[test]
    fn test_warehouse_error_message_is_preserved() {
        let error = ToolError::from(WarehouseError::api(503, "connection reset by peer"));
        assert!(matches!(error, ToolError::Upstream(_)));
        assert!(error.to_string().contains("connection reset by peer"));
    }
}
