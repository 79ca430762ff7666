//! Acumatica MCP Library
//!
//! Model Context Protocol server for the Acumatica ERP contract-based REST
//! API. Read-only query and get tools over one shared, cookie-authenticated
//! session.

pub mod api;
pub mod auth;
pub mod config;
pub mod mcp;

pub use api::{AcumaticaClient, ClientError, QueryParams};
pub use auth::{AcumaticaSession, AuthError};
pub use config::{Config, ConfigError, RuntimeConfig};
pub use mcp::AcumaticaMcpServer;
