//! Get table schema tool definition.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, instrument};

use crate::core::security::AllowlistGuard;
use crate::core::warehouse::WarehouseClient;
use crate::domains::tools::args::ToolArguments;
use crate::domains::tools::{ParameterSpec, ToolDefinition, ToolError, ToolHandler, format};

/// Get table schema tool - describes the columns of one table.
pub struct GetTableSchemaTool {
    guard: Arc<AllowlistGuard>,
    warehouse: Arc<dyn WarehouseClient>,
}

impl GetTableSchemaTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "get_table_schema";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str =
        "Get the schema of a specified table in a specified dataset.";

    pub fn new(guard: Arc<AllowlistGuard>, warehouse: Arc<dyn WarehouseClient>) -> Self {
        Self { guard, warehouse }
    }

    /// Tool metadata.
    pub fn definition() -> ToolDefinition {
        ToolDefinition::new(Self::NAME, Self::DESCRIPTION)
            .with_parameter(
                ParameterSpec::string("dataset", "The dataset to get the table schema from")
                    .required(),
            )
            .with_parameter(
                ParameterSpec::string("table", "The table to get the schema from").required(),
            )
    }
}

#[async_trait]
impl ToolHandler for GetTableSchemaTool {
    #[instrument(skip_all)]
    async fn call(&self, arguments: &ToolArguments) -> Result<String, ToolError> {
        let dataset = arguments.string("dataset")?;
        let table = arguments.string("table")?;
        self.guard.enforce(dataset)?;

        info!("Getting schema for table {} in dataset {}", table, dataset);
        let fields = self.warehouse.get_table_schema(dataset, table).await?;

        Ok(format::table_schema(dataset, table, &fields))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::warehouse::SchemaField;
    use crate::core::warehouse::fake::FakeWarehouse;
    use serde_json::json;

    fn arguments(value: serde_json::Value) -> ToolArguments {
        ToolArguments::validate(
            &GetTableSchemaTool::definition().parameters,
            value.as_object().unwrap(),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_renders_schema() {
        let warehouse = Arc::new(FakeWarehouse::new().with_schema(
            "sales",
            "orders",
            vec![
                SchemaField::new("id", "INTEGER").required(),
                SchemaField::new("items", "RECORD")
                    .with_description("Line items")
                    .repeated(),
            ],
        ));
        let tool = GetTableSchemaTool::new(Arc::new(AllowlistGuard::new(["sales"])), warehouse);

        let text = tool
            .call(&arguments(json!({"dataset": "sales", "table": "orders"})))
            .await
            .unwrap();
        assert_eq!(
            text,
            "Schema for table orders in dataset sales:\n\n\
             - id (INTEGER)\n  Required: true\n\n\
             - items (RECORD)\n  Description: Line items\n  Repeated: true\n\n"
        );
    }

    #[tokio::test]
    async fn test_missing_table_is_upstream_error() {
        let warehouse = Arc::new(FakeWarehouse::new());
        let tool = GetTableSchemaTool::new(Arc::new(AllowlistGuard::new(["sales"])), warehouse);

        let err = tool
            .call(&arguments(json!({"dataset": "sales", "table": "nope"})))
            .await
            .unwrap_err();
        match err {
            ToolError::Upstream(message) => assert!(message.contains("Not found: Table sales.nope")),
            other => panic!("expected Upstream, got {:?}", other),
        }
    }
}
