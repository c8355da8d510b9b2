//! List tables tool definition.
//!
//! Lists the tables of one allowed dataset.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, instrument};

use crate::core::security::AllowlistGuard;
use crate::core::warehouse::WarehouseClient;
use crate::domains::tools::args::ToolArguments;
use crate::domains::tools::{ParameterSpec, ToolDefinition, ToolError, ToolHandler, format};

/// List tables tool - lists all tables in a dataset.
pub struct ListTablesTool {
    guard: Arc<AllowlistGuard>,
    warehouse: Arc<dyn WarehouseClient>,
}

impl ListTablesTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "list_tables";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str =
        "Get a detailed listing of all tables in a specified dataset.";

    pub fn new(guard: Arc<AllowlistGuard>, warehouse: Arc<dyn WarehouseClient>) -> Self {
        Self { guard, warehouse }
    }

    /// Tool metadata.
    pub fn definition() -> ToolDefinition {
        ToolDefinition::new(Self::NAME, Self::DESCRIPTION).with_parameter(
            ParameterSpec::string("dataset", "The dataset to list tables from").required(),
        )
    }
}

#[async_trait]
impl ToolHandler for ListTablesTool {
    #[instrument(skip_all)]
    async fn call(&self, arguments: &ToolArguments) -> Result<String, ToolError> {
        let dataset = arguments.string("dataset")?;
        self.guard.enforce(dataset)?;

        info!("Listing tables in dataset: {}", dataset);
        let tables = self.warehouse.list_tables(dataset).await?;
        info!("Found {} tables in {}", tables.len(), dataset);

        Ok(format::table_list(dataset, &tables))
    }
}
