//! Tools domain module.
//!
//! This module handles all tool-related functionality for the MCP server.
//! Tools are the operations MCP clients can call against the warehouse.
//!
//! ## Architecture
//!
//! - `definitions/` - Individual tool implementations (one file per tool)
//! - `tool.rs` - Tool metadata (`ToolDefinition`, `ParameterSpec`)
//! - `args.rs` - Typed argument validation
//! - `registry.rs` - Startup registration and the frozen name → handler table
//! - `dispatcher.rs` - Per-request pipeline (lookup, validation, timeout)
//! - `format.rs` - Text rendering of warehouse results
//! - `error.rs` - Tool-specific error types
//!
//! ## Adding a New Tool
//!
//! 1. Create a new file in `definitions/` with `NAME`, `definition()` and a
//!    `ToolHandler` implementation
//! 2. Export it in `definitions/mod.rs`
//! 3. Register it in `registry::build_catalog`
//!
//! **No need to modify `server.rs`!** Listing and dispatch go through the registry.

pub mod args;
pub mod definitions;
mod dispatcher;
mod error;
pub mod format;
mod handlers;
mod registry;
mod tool;

pub use args::{ArgumentValue, ToolArguments};
pub use dispatcher::ToolDispatcher;
pub use error::ToolError;
pub use handlers::*;
pub use registry::{RegisteredTool, ToolRegistry, ToolRegistryBuilder, build_catalog};
pub use tool::{ParameterKind, ParameterSpec, ToolDefinition};
