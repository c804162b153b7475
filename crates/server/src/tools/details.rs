//! details tool implementation.
//!
//! Fetches one package page and returns its metadata with the assembled Markdown documentation.

use godoc_client::PackageSource;
use godoc_core::{Error, Package};
use rmcp::{
    ErrorData as McpError,
    model::{CallToolResult, Content},
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Input parameters for the details tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct DetailsParams {
    /// Package page URL, as returned by search_package.
    pub url: String,
}

/// Output structure for the details tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct DetailsOutput {
    pub name: String,
    pub description: String,
    pub version: String,
    /// Markdown with `# Overview` and `# Documentation` sections.
    pub documentation: String,
}

impl From<Package> for DetailsOutput {
    fn from(package: Package) -> Self {
        Self {
            name: package.name,
            description: package.description,
            version: package.version,
            documentation: package.documentation,
        }
    }
}

/// Implementation of the details tool.
pub async fn details_impl(source: &dyn PackageSource, params: DetailsParams) -> Result<CallToolResult, McpError> {
    let url = params.url.trim();
    if url.is_empty() {
        return Err(Error::InvalidInput("url cannot be empty".into()).into());
    }

    tracing::info!(tool = "details", url, "tool call");

    let output = DetailsOutput::from(source.details(url).await?);
    let json = serde_json::to_string_pretty(&output).map_err(Error::from)?;

    Ok(CallToolResult::success(vec![Content::text(json)]))
}
