//! Dry run query tool definition.
//!
//! Asks the warehouse for a cost estimate of a query without running it.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, instrument};

use crate::core::security::AllowlistGuard;
use crate::core::warehouse::WarehouseClient;
use crate::domains::tools::args::ToolArguments;
use crate::domains::tools::{ParameterSpec, ToolDefinition, ToolError, ToolHandler, format};

/// Dry run query tool - estimates bytes scanned by a query.
pub struct DryRunQueryTool {
    guard: Arc<AllowlistGuard>,
    warehouse: Arc<dyn WarehouseClient>,
}

impl DryRunQueryTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "dry_run_query";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Dry run a query to get the estimated cost and time.";

    pub fn new(guard: Arc<AllowlistGuard>, warehouse: Arc<dyn WarehouseClient>) -> Self {
        Self { guard, warehouse }
    }

    /// Tool metadata.
    pub fn definition() -> ToolDefinition {
        ToolDefinition::new(Self::NAME, Self::DESCRIPTION)
            .with_parameter(
                ParameterSpec::string("dataset", "The dataset to dry run the query on").required(),
            )
            .with_parameter(ParameterSpec::string("query", "The query to dry run").required())
    }
}

#[async_trait]
impl ToolHandler for DryRunQueryTool {
    #[instrument(skip_all)]
    async fn call(&self, arguments: &ToolArguments) -> Result<String, ToolError> {
        let dataset = arguments.string("dataset")?;
        let query = arguments.string("query")?;
        self.guard.enforce(dataset)?;

        info!("Dry running query against dataset: {}", dataset);
        let status = self.warehouse.dry_run_query(query, dataset).await?;
        info!(
            "Dry run finished: {} bytes, {} errors",
            status.total_bytes_processed,
            status.errors.len()
        );

        Ok(format::dry_run(&status))
    }
}
