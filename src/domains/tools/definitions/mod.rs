//! Tool definitions module.
//!
//! This module exports all available tool definitions.
//! Each tool is defined in its own file and exposes its `NAME`, its
//! [`ToolDefinition`](super::ToolDefinition) and a [`ToolHandler`](super::ToolHandler)
//! implementation.

pub mod dry_run_query;
pub mod get_table_schema;
pub mod list_allowed_datasets;
pub mod list_tables;

pub use dry_run_query::DryRunQueryTool;
pub use get_table_schema::GetTableSchemaTool;
pub use list_allowed_datasets::ListAllowedDatasetsTool;
pub use list_tables::ListTablesTool;
