//! STDIO transport implementation.
//!
//! Standard input/output transport for MCP. Logs go to stderr so stdout
//! carries protocol messages only.

use rmcp::{RoleServer, ServiceExt, transport::IntoTransport};
use tracing::info;

use super::{TransportError, TransportResult};
use crate::core::McpServer;

/// STDIO transport handler.
pub struct StdioTransport;

impl StdioTransport {
    /// Serve `server` until stdin closes.
    ///
    /// In-flight requests are cancelled when the client goes away.
    pub async fn run(server: McpServer) -> TransportResult<()> {
        info!("Ready - communicating via stdin/stdout");
        Self::run_on(server, rmcp::transport::stdio()).await
    }

    /// Serve `server` over any line-delimited JSON-RPC byte stream.
    pub async fn run_on<T, E, A>(server: McpServer, transport: T) -> TransportResult<()>
    where
        T: IntoTransport<RoleServer, E, A>,
        E: std::error::Error + Send + Sync + 'static,
    {
        let service = ServiceExt::serve(server, transport)
            .await
            .map_err(|e| TransportError::init(e.to_string()))?;

        let reason = service
            .waiting()
            .await
            .map_err(|e| TransportError::service(e.to_string()))?;

        info!("STDIO transport finished: {:?}", reason);
        Ok(())
    }
}
