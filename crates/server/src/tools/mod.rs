//! MCP tool implementations.
//!
//! Each tool validates its parameters, asks a [`godoc_client::PackageSource`]
//! and renders the result as JSON text content.

pub mod details;
pub mod search_package;
