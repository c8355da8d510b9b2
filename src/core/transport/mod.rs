//! Transport layer for the MCP server.
//!
//! The server speaks MCP JSON-RPC over standard input/output. The transport
//! owns the serving loop: it starts when the registry is frozen and ends
//! when stdin closes or the connection fails.

mod error;
pub mod stdio;

pub use error::{TransportError, TransportResult};
pub use stdio::StdioTransport;
