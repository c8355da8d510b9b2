//! Tool call dispatch.
//!
//! Every `tools/call` request goes through [`ToolDispatcher::dispatch`]:
//! 1. look up the tool by name
//! 2. validate the arguments against its declared parameters
//! 3. run the handler (allowlist check, warehouse call, formatting) under a
//!    timeout, racing the request's cancellation token
//!
//! Any failure becomes a tool-level error result; nothing here can stop the
//! serving loop.

use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::{info, instrument, warn};

use super::args::ToolArguments;
use super::registry::ToolRegistry;
use super::{ToolCallRequest, ToolCallResult, ToolError};

/// Routes tool calls through a frozen [`ToolRegistry`].
pub struct ToolDispatcher {
    registry: ToolRegistry,
    timeout: Duration,
}

impl ToolDispatcher {
    pub fn new(registry: ToolRegistry, timeout: Duration) -> Self {
        Self { registry, timeout }
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    /// Handle one tool call.
    #[instrument(skip_all, fields(tool = %request.name))]
    pub async fn dispatch(
        &self,
        request: ToolCallRequest,
        cancellation: CancellationToken,
    ) -> ToolCallResult {
        info!("Tool call received");

        let result = self.try_dispatch(&request, cancellation).await;
        match &result {
            Ok(_) => info!("Tool call succeeded"),
            Err(e) => warn!("Tool call failed: {}", e),
        }

        result.into()
    }

    async fn try_dispatch(
        &self,
        request: &ToolCallRequest,
        cancellation: CancellationToken,
    ) -> Result<String, ToolError> {
        let tool = self.registry.lookup(&request.name)?;
        let arguments = ToolArguments::validate(&tool.definition().parameters, &request.arguments)?;

        let call = tokio::time::timeout(self.timeout, tool.handler().call(&arguments));

        tokio::select! {
            biased;
            _ = cancellation.cancelled() => Err(ToolError::Cancelled),
            outcome = call => match outcome {
                Ok(result) => result,
                Err(_elapsed) => Err(ToolError::Timeout(self.timeout)),
            },
        }
    }
}
