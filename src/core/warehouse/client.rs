//! Warehouse capability trait and the values it returns.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::WarehouseResult;

/// A column descriptor as reported by the warehouse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaField {
    /// Column name.
    pub name: String,

    /// Column type (e.g. `STRING`, `INTEGER`, `RECORD`).
    pub field_type: String,

    /// Free-form column description, if any.
    pub description: Option<String>,

    /// Whether the column holds an array of values.
    pub repeated: bool,

    /// Whether the column is declared `REQUIRED`.
    pub required: bool,
}

impl SchemaField {
    /// Create a nullable, non-repeated field without a description.
    pub fn new(name: impl Into<String>, field_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            field_type: field_type.into(),
            description: None,
            repeated: false,
            required: false,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn repeated(mut self) -> Self {
        self.repeated = true;
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }
}

/// Outcome of a dry-run (cost estimate) of a query.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DryRunStatus {
    /// Errors reported for the job, in the order the warehouse returned them.
    pub errors: Vec<String>,

    /// Number of bytes the query would scan.
    pub total_bytes_processed: u64,
}

/// The three warehouse operations the tool layer depends on.
///
/// Implementations must be safe to call concurrently from multiple
/// in-flight tool calls. None of the operations has side effects on the
/// warehouse.
#[async_trait]
pub trait WarehouseClient: Send + Sync {
    /// List the table identifiers of a dataset, in warehouse order.
    async fn list_tables(&self, dataset: &str) -> WarehouseResult<Vec<String>>;

    /// Fetch the top-level schema fields of a table.
    async fn get_table_schema(&self, dataset: &str, table: &str)
    -> WarehouseResult<Vec<SchemaField>>;

    /// Estimate the cost of `query` against `dataset` without executing it.
    async fn dry_run_query(&self, query: &str, dataset: &str) -> WarehouseResult<DryRunStatus>;
}
