//! Tool Registry - central registration and lookup for all tools.
//!
//! This module provides:
//! - [`ToolRegistryBuilder`], used only while the server is starting
//! - [`ToolRegistry`], the frozen name → handler table used while serving
//! - [`build_catalog`], which assembles the catalog for a configuration

use std::collections::HashMap;
use std::sync::Arc;

use rmcp::model::Tool;
use tracing::{debug, warn};

use super::definitions::{
    DryRunQueryTool, GetTableSchemaTool, ListAllowedDatasetsTool, ListTablesTool,
};
use super::{ToolDefinition, ToolError, ToolHandler};
use crate::core::config::CatalogConfig;
use crate::core::security::AllowlistGuard;
use crate::core::warehouse::WarehouseClient;

/// A tool definition bound to its handler.
pub struct RegisteredTool {
    definition: ToolDefinition,
    handler: Arc<dyn ToolHandler>,
}

impl RegisteredTool {
    pub fn definition(&self) -> &ToolDefinition {
        &self.definition
    }

    pub fn handler(&self) -> &dyn ToolHandler {
        self.handler.as_ref()
    }
}

// ============================================================================
// Builder
// ============================================================================

/// Collects tools during startup.
#[derive(Default)]
pub struct ToolRegistryBuilder {
    tools: Vec<RegisteredTool>,
    index: HashMap<String, usize>,
}

impl ToolRegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register one tool; names must be unique.
    pub fn register(
        &mut self,
        definition: ToolDefinition,
        handler: Arc<dyn ToolHandler>,
    ) -> Result<&mut Self, ToolError> {
        if self.index.contains_key(&definition.name) {
            warn!("Duplicate tool registration: {}", definition.name);
            return Err(ToolError::DuplicateTool(definition.name));
        }

        debug!("Registering tool: {}", definition.name);
        self.index.insert(definition.name.clone(), self.tools.len());
        self.tools.push(RegisteredTool {
            definition,
            handler,
        });
        Ok(self)
    }

    /// Freeze the registry. No tool can be added afterwards.
    pub fn build(self) -> ToolRegistry {
        ToolRegistry {
            tools: self.tools,
            index: self.index,
        }
    }
}

// ============================================================================
// Tool Registry
// ============================================================================

/// Frozen tool registry, shared read-only while serving.
pub struct ToolRegistry {
    tools: Vec<RegisteredTool>,
    index: HashMap<String, usize>,
}

impl ToolRegistry {
    pub fn builder() -> ToolRegistryBuilder {
        ToolRegistryBuilder::new()
    }

    /// Find a tool by name.
    pub fn lookup(&self, name: &str) -> Result<&RegisteredTool, ToolError> {
        self.index
            .get(name)
            .map(|&i| &self.tools[i])
            .ok_or_else(|| ToolError::not_found(name))
    }

    /// Get all tool names, in registration order.
    pub fn tool_names(&self) -> Vec<&str> {
        self.tools
            .iter()
            .map(|t| t.definition.name.as_str())
            .collect()
    }

    /// Get all tools as Tool models (metadata), in registration order.
    pub fn tools(&self) -> Vec<Tool> {
        self.tools.iter().map(|t| t.definition.to_tool()).collect()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

/// Register the tool catalog for `catalog` and freeze it.
///
/// `list_tables` and `get_table_schema` are always present;
/// `list_allowed_datasets` and `dry_run_query` follow the switches.
pub fn build_catalog(
    catalog: &CatalogConfig,
    guard: Arc<AllowlistGuard>,
    warehouse: Arc<dyn WarehouseClient>,
) -> Result<ToolRegistry, ToolError> {
    let mut builder = ToolRegistry::builder();

    if catalog.list_allowed_datasets {
        builder.register(
            ListAllowedDatasetsTool::definition(),
            Arc::new(ListAllowedDatasetsTool::new(guard.clone())),
        )?;
    }

    builder
        .register(
            ListTablesTool::definition(),
            Arc::new(ListTablesTool::new(guard.clone(), warehouse.clone())),
        )?
        .register(
            GetTableSchemaTool::definition(),
            Arc::new(GetTableSchemaTool::new(guard.clone(), warehouse.clone())),
        )?;

    if catalog.dry_run_query {
        builder.register(
            DryRunQueryTool::definition(),
            Arc::new(DryRunQueryTool::new(guard, warehouse)),
        )?;
    }

    Ok(builder.build())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::warehouse::fake::FakeWarehouse;

    fn catalog(list_allowed_datasets: bool, dry_run_query: bool) -> ToolRegistry {
        build_catalog(
            &CatalogConfig {
                list_allowed_datasets,
                dry_run_query,
            },
            Arc::new(AllowlistGuard::new(["sales"])),
            Arc::new(FakeWarehouse::new()),
        )
        .unwrap()
    }

    #[test]
    fn test_full_catalog() {
        let registry = catalog(true, true);
        assert_eq!(
            registry.tool_names(),
            vec![
                "list_allowed_datasets",
                "list_tables",
                "get_table_schema",
                "dry_run_query"
            ]
        );
        assert_eq!(registry.tools().len(), 4);
    }

    #[test]
    fn test_strict_catalog() {
        let registry = catalog(false, false);
        assert_eq!(registry.tool_names(), vec!["list_tables", "get_table_schema"]);
        assert!(matches!(
            registry.lookup("dry_run_query"),
            Err(ToolError::NotFound(_))
        ));
    }

    #[test]
    fn test_duplicate_registration_fails() {
        let guard = Arc::new(AllowlistGuard::new(["sales"]));
        let warehouse: Arc<dyn WarehouseClient> = Arc::new(FakeWarehouse::new());
        let mut builder = ToolRegistry::builder();

        builder
            .register(
                ListTablesTool::definition(),
                Arc::new(ListTablesTool::new(guard.clone(), warehouse.clone())),
            )
            .unwrap();
        let result = builder.register(
            ListTablesTool::definition(),
            Arc::new(ListTablesTool::new(guard, warehouse)),
        );

        match result {
            Err(ToolError::DuplicateTool(name)) => assert_eq!(name, "list_tables"),
            Err(other) => panic!("expected DuplicateTool, got {:?}", other),
            Ok(_) => panic!("expected DuplicateTool"),
        }
        assert_eq!(builder.build().len(), 1);
    }

    #[test]
    fn test_lookup() {
        let registry = catalog(true, true);
        let tool = registry.lookup("get_table_schema").unwrap();
        assert_eq!(tool.definition().parameters.len(), 2);

        match registry.lookup("delete_dataset") {
            Err(ToolError::NotFound(name)) => assert_eq!(name, "delete_dataset"),
            _ => panic!("expected NotFound"),
        }
    }
}
