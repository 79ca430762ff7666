//! Acumatica entity API access
//!
//! Query parameter construction, path building, and the authenticated HTTP
//! client shared by every tool.

pub mod client;
pub mod query;

pub use client::{AcumaticaClient, ClientError};
pub use query::{effective_top, QueryParams, DEFAULT_TOP, MAX_TOP};
