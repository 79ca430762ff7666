//! MCP server implementation
//!
//! JSON-RPC 2.0 protocol types, the request handler, and the query tools
//! exposed over the Acumatica entity API.

pub mod protocol;
mod server;
mod tools;

pub use protocol::*;
pub use server::AcumaticaMcpServer;
