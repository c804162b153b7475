//! Core types and shared functionality for godoc-mcp.
//!
//! This crate provides:
//! - The `Package` domain model
//! - Unified error types
//! - Configuration structures

pub mod config;
pub mod error;
pub mod model;

pub use config::{AppConfig, ConfigError};
pub use error::Error;
pub use model::Package;
