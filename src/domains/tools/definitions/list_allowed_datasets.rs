//! List allowed datasets tool definition.
//!
//! Returns the configured allowlist without contacting the warehouse.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::core::security::AllowlistGuard;
use crate::domains::tools::args::ToolArguments;
use crate::domains::tools::{ToolDefinition, ToolError, ToolHandler, format};

/// List allowed datasets tool.
pub struct ListAllowedDatasetsTool {
    guard: Arc<AllowlistGuard>,
}

impl ListAllowedDatasetsTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "list_allowed_datasets";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Get a listing of all allowed datasets.";

    pub fn new(guard: Arc<AllowlistGuard>) -> Self {
        Self { guard }
    }

    /// Tool metadata; takes no parameters.
    pub fn definition() -> ToolDefinition {
        ToolDefinition::new(Self::NAME, Self::DESCRIPTION)
    }
}

#[async_trait]
impl ToolHandler for ListAllowedDatasetsTool {
    async fn call(&self, _arguments: &ToolArguments) -> Result<String, ToolError> {
        info!("Listing {} allowed datasets", self.guard.datasets().len());
        Ok(format::allowed_datasets(self.guard.datasets()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_lists_configured_datasets_verbatim() {
        let tool = ListAllowedDatasetsTool::new(Arc::new(AllowlistGuard::new([
            "sales",
            "Marketing",
        ])));
        let text = tool.call(&ToolArguments::default()).await.unwrap();
        assert_eq!(text, "Allowed datasets: sales, Marketing");
    }

    #[test]
    fn test_definition_has_no_parameters() {
        let definition = ListAllowedDatasetsTool::definition();
        assert_eq!(definition.name, "list_allowed_datasets");
        assert!(definition.parameters.is_empty());
    }
}
