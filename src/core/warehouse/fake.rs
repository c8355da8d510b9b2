//! In-memory warehouse used by unit tests.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use super::{DryRunStatus, SchemaField, WarehouseClient, WarehouseError, WarehouseResult};

/// Fake warehouse with canned responses and a call counter.
#[derive(Default)]
pub struct FakeWarehouse {
    tables: HashMap<String, Vec<String>>,
    schemas: HashMap<(String, String), Vec<SchemaField>>,
    dry_run: DryRunStatus,
    failures: Mutex<VecDeque<String>>,
    delay: Option<Duration>,
    calls: AtomicUsize,
}

impl FakeWarehouse {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tables(mut self, dataset: &str, tables: &[&str]) -> Self {
        self.tables.insert(
            dataset.to_string(),
            tables.iter().map(|t| t.to_string()).collect(),
        );
        self
    }

    pub fn with_schema(mut self, dataset: &str, table: &str, fields: Vec<SchemaField>) -> Self {
        self.schemas
            .insert((dataset.to_string(), table.to_string()), fields);
        self
    }

    pub fn with_dry_run(mut self, status: DryRunStatus) -> Self {
        self.dry_run = status;
        self
    }

    /// Make the next call fail with `message`.
    pub fn fail_next(self, message: &str) -> Self {
        self.failures
            .lock()
            .unwrap()
            .push_back(message.to_string());
        self
    }

    /// Delay every call, to exercise timeouts and cancellation.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Number of warehouse operations invoked so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    async fn begin_call(&self) -> WarehouseResult<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        match self.failures.lock().unwrap().pop_front() {
            Some(message) => Err(WarehouseError::api(503, message)),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl WarehouseClient for FakeWarehouse {
    async fn list_tables(&self, dataset: &str) -> WarehouseResult<Vec<String>> {
        self.begin_call().await?;
        self.tables
            .get(dataset)
            .cloned()
            .ok_or_else(|| WarehouseError::api(404, format!("Not found: Dataset {}", dataset)))
    }

    async fn get_table_schema(
        &self,
        dataset: &str,
        table: &str,
    ) -> WarehouseResult<Vec<SchemaField>> {
        self.begin_call().await?;
        self.schemas
            .get(&(dataset.to_string(), table.to_string()))
            .cloned()
            .ok_or_else(|| {
                WarehouseError::api(404, format!("Not found: Table {}.{}", dataset, table))
            })
    }

    async fn dry_run_query(&self, _query: &str, _dataset: &str) -> WarehouseResult<DryRunStatus> {
        self.begin_call().await?;
        Ok(self.dry_run.clone())
    }
}
