//! Warehouse adapter layer.
//!
//! The tools domain talks to BigQuery exclusively through the
//! [`WarehouseClient`] trait, which exposes exactly three read-only
//! operations. [`BigQueryClient`] is the production implementation over the
//! BigQuery REST API; tests substitute an in-memory fake.

mod auth;
pub mod bigquery;
mod client;
mod error;

#[cfg(test)]
pub(crate) mod fake;

pub use auth::TokenSource;
pub use bigquery::BigQueryClient;
pub use client::{DryRunStatus, SchemaField, WarehouseClient};
pub use error::{WarehouseError, WarehouseResult};
