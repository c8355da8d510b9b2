//! Tool handler contract and the request/result types of one tool call.

use rmcp::model::{CallToolRequestParam, CallToolResult, Content, JsonObject};

use super::ToolError;
use super::args::ToolArguments;

/// An incoming tool call: tool name plus raw arguments.
#[derive(Debug, Clone)]
pub struct ToolCallRequest {
    /// The name of the tool to execute.
    pub name: String,

    /// The arguments to pass to the tool.
    pub arguments: JsonObject,
}

impl ToolCallRequest {
    pub fn new(name: impl Into<String>, arguments: JsonObject) -> Self {
        Self {
            name: name.into(),
            arguments,
        }
    }
}

impl From<CallToolRequestParam> for ToolCallRequest {
    fn from(request: CallToolRequestParam) -> Self {
        Self::new(request.name, request.arguments.unwrap_or_default())
    }
}

/// Output from a tool call: rendered text or an error, never both.
#[derive(Debug)]
pub enum ToolCallResult {
    Success(String),
    Failure(ToolError),
}

impl ToolCallResult {
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Failure(_))
    }

    /// The rendered text of a successful call.
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Success(text) => Some(text),
            Self::Failure(_) => None,
        }
    }

    /// The error of a failed call.
    pub fn error(&self) -> Option<&ToolError> {
        match self {
            Self::Success(_) => None,
            Self::Failure(error) => Some(error),
        }
    }
}

impl From<Result<String, ToolError>> for ToolCallResult {
    fn from(result: Result<String, ToolError>) -> Self {
        match result {
            Ok(text) => Self::Success(text),
            Err(error) => Self::Failure(error),
        }
    }
}

impl From<ToolCallResult> for CallToolResult {
    fn from(result: ToolCallResult) -> Self {
        match result {
            ToolCallResult::Success(text) => CallToolResult::success(vec![Content::text(text)]),
            ToolCallResult::Failure(error) => {
                CallToolResult::error(vec![Content::text(error.to_string())])
            }
        }
    }
}

/// Trait implemented by every tool.
///
/// Handlers receive arguments that were already validated against the
/// tool's declared parameters. Dataset-scoped handlers must enforce the
/// allowlist before calling the warehouse.
#[async_trait::async_trait]
pub trait ToolHandler: Send + Sync {
    /// Execute the tool and render its text output.
    async fn call(&self, arguments: &ToolArguments) -> Result<String, ToolError>;
}
