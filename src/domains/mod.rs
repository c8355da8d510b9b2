//! Domains module containing business logic organized by bounded contexts.
//!
//! The server exposes a single domain, tools: the warehouse operations MCP
//! clients can call, guarded by the dataset allowlist.

pub mod tools;
