//! MCP Server implementation and lifecycle management.
//!
//! This module contains the main server handler that implements the MCP
//! protocol by delegating tool calls to the [`ToolDispatcher`].
//!
//! ## Lifecycle
//!
//! `Uninitialized → Registering → Serving → Terminated`
//!
//! - [`McpServer::connect`] builds the warehouse client; failure aborts
//!   startup before anything is served.
//! - [`McpServer::new`] registers the tool catalog and freezes the registry.
//! - [`McpServer::serve`] runs the stdio transport until the client hangs up.

use rmcp::{
    ErrorData as McpError, RoleServer, ServerHandler, model::*, service::RequestContext,
};
use std::fmt;
use std::sync::Arc;
use tracing::{info, instrument};

use super::config::Config;
use super::error::{Error, Result};
use super::security::AllowlistGuard;
use super::transport::StdioTransport;
use super::warehouse::{BigQueryClient, WarehouseClient};
use crate::domains::tools::{ToolCallRequest, ToolDispatcher, build_catalog};

/// Serving lifecycle states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServerState {
    Uninitialized,
    Registering,
    Serving,
    Terminated,
}

impl fmt::Display for ServerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Uninitialized => "uninitialized",
            Self::Registering => "registering",
            Self::Serving => "serving",
            Self::Terminated => "terminated",
        };
        f.write_str(name)
    }
}

fn enter(state: ServerState) {
    info!(%state, "Server state changed");
}

/// The main MCP server handler.
///
/// Cloned per connection by rmcp; all state behind it is immutable after
/// construction.
#[derive(Clone)]
pub struct McpServer {
    /// Server configuration.
    config: Arc<Config>,

    /// Frozen tool registry plus the per-call pipeline.
    dispatcher: Arc<ToolDispatcher>,
}

impl McpServer {
    /// Create the BigQuery client and register the tool catalog.
    pub async fn connect(config: Config) -> Result<Self> {
        enter(ServerState::Uninitialized);

        let warehouse = BigQueryClient::connect(&config.warehouse)
            .await
            .map_err(|e| Error::startup(format!("failed to create BigQuery client: {}", e)))?;

        Self::new(config, Arc::new(warehouse))
    }

    /// Register the tool catalog against `warehouse` and freeze it.
    pub fn new(config: Config, warehouse: Arc<dyn WarehouseClient>) -> Result<Self> {
        enter(ServerState::Registering);

        let config = Arc::new(config);
        let guard = Arc::new(AllowlistGuard::new(config.datasets.iter().cloned()));
        let registry = build_catalog(&config.catalog, guard, warehouse)?;

        info!(
            "Registered {} tools: {}",
            registry.len(),
            registry.tool_names().join(", ")
        );

        let dispatcher = ToolDispatcher::new(registry, config.warehouse.request_timeout());

        Ok(Self {
            config,
            dispatcher: Arc::new(dispatcher),
        })
    }

    /// Serve over stdio until the client disconnects.
    pub async fn serve(self) -> Result<()> {
        enter(ServerState::Serving);
        let result = StdioTransport::run(self).await;
        enter(ServerState::Terminated);

        result.map_err(Error::from)
    }

    /// Get the server name.
    pub fn name(&self) -> &str {
        &self.config.server.name
    }

    /// Get the server version.
    pub fn version(&self) -> &str {
        &self.config.server.version
    }

    /// Get the server configuration.
    pub fn config(&self) -> &Arc<Config> {
        &self.config
    }

    /// The tool dispatcher.
    pub fn dispatcher(&self) -> &ToolDispatcher {
        &self.dispatcher
    }

    /// List all available tools.
    pub fn tools(&self) -> Vec<Tool> {
        self.dispatcher.registry().tools()
    }

    fn instructions(&self) -> String {
        format!(
            "Read-only access to BigQuery project '{}'. Only these datasets may be used: {}.",
            self.config.warehouse.project,
            self.config.datasets.join(", ")
        )
    }
}

impl ServerHandler for McpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            server_info: Implementation {
                name: self.name().to_string(),
                version: self.version().to_string(),
                ..Implementation::from_build_env()
            },
            instructions: Some(self.instructions()),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }

    #[instrument(skip(self, _context))]
    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<ListToolsResult, McpError> {
        info!("Listing tools");
        Ok(ListToolsResult {
            tools: self.tools(),
            next_cursor: None,
            meta: None,
        })
    }

    #[instrument(skip(self, request, context), fields(tool = %request.name))]
    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        context: RequestContext<RoleServer>,
    ) -> std::result::Result<CallToolResult, McpError> {
        let result = self
            .dispatcher
            .dispatch(ToolCallRequest::from(request), context.ct)
            .await;
        Ok(result.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::warehouse::fake::FakeWarehouse;
    use crate::domains::tools::ToolError;
    use serde_json::json;
    use tokio_util::sync::CancellationToken;

    fn test_config() -> Config {
        Config::new()
            .with_project("analytics-prod")
            .with_datasets(["sales", "marketing"])
    }

    #[test]
    fn test_default_catalog() {
        let server = McpServer::new(test_config(), Arc::new(FakeWarehouse::new())).unwrap();
        let names: Vec<_> = server.tools().into_iter().map(|t| t.name).collect();
        assert_eq!(
            names,
            vec![
                "list_allowed_datasets",
                "list_tables",
                "get_table_schema",
                "dry_run_query"
            ]
        );
    }

    #[test]
    fn test_optional_tools_can_be_disabled() {
        let mut config = test_config();
        config.catalog.list_allowed_datasets = false;
        config.catalog.dry_run_query = false;

        let server = McpServer::new(config, Arc::new(FakeWarehouse::new())).unwrap();
        assert_eq!(
            server.dispatcher().registry().tool_names(),
            vec!["list_tables", "get_table_schema"]
        );
    }

    #[test]
    fn test_get_info() {
        let server = McpServer::new(test_config(), Arc::new(FakeWarehouse::new())).unwrap();
        let info = server.get_info();
        assert!(info.capabilities.tools.is_some());
        let instructions = info.instructions.unwrap();
        assert!(instructions.contains("analytics-prod"));
        assert!(instructions.contains("sales, marketing"));
        assert_eq!(info.server_info.name, "bigquery-server");
        assert_eq!(info.server_info.version, env!("CARGO_PKG_VERSION"));
    }

    #[tokio::test]
    async fn test_dispatch_through_server() {
        let warehouse = Arc::new(FakeWarehouse::new().with_tables("sales", &["orders"]));
        let server = McpServer::new(test_config(), warehouse.clone()).unwrap();

        let request = ToolCallRequest::new(
            "list_tables",
            json!({"dataset": "marketing"}).as_object().cloned().unwrap(),
        );
        let result = server
            .dispatcher()
            .dispatch(request, CancellationToken::new())
            .await;

        // Allowed, but unknown to the warehouse.
        assert!(matches!(result.error(), Some(ToolError::Upstream(_))));
        assert_eq!(warehouse.calls(), 1);
    }

    #[test]
    fn test_state_display() {
        assert_eq!(ServerState::Registering.to_string(), "registering");
        assert_eq!(ServerState::Terminated.to_string(), "terminated");
    }
}
