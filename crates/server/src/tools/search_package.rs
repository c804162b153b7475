//! search_package tool implementation.
//!
//! Looks up candidate packages and lists them with the URLs the details tool accepts.

use godoc_client::PackageSource;
use godoc_core::{Error, Package};
use rmcp::{
    ErrorData as McpError,
    model::{CallToolResult, Content},
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Input parameters for the search_package tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SearchPackageParams {
    /// Package name or keywords to search for, e.g. "mcp-go".
    #[serde(rename = "packageName")]
    pub package_name: String,
}

/// One search result as presented to the model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SearchHit {
    /// Position in the site's ranking, starting at 0.
    pub id: usize,
    pub name: String,
    pub description: String,
    /// Pass this to the details tool.
    pub url: String,
}

impl SearchHit {
    fn from_package(id: usize, package: Package) -> Self {
        Self { id, name: package.name, description: package.description, url: package.url }
    }
}

/// Render search results as the tool's text payload.
pub fn render_results(packages: Vec<Package>) -> Result<String, Error> {
    if packages.is_empty() {
        return Ok("No packages matched the query. Try a shorter name or a different keyword.".to_string());
    }

    let hits: Vec<SearchHit> = packages
        .into_iter()
        .enumerate()
        .map(|(id, package)| SearchHit::from_package(id, package))
        .collect();
    let json = serde_json::to_string_pretty(&hits)?;

    Ok(format!(
        "Found {} packages. Get the documentation of the one you want with the \"details\" tool:\n{}\nWhen calling \"details\", pass one of the URLs above.",
        hits.len(),
        json
    ))
}

/// Implementation of the search_package tool.
pub async fn search_impl(source: &dyn PackageSource, params: SearchPackageParams) -> Result<CallToolResult, McpError> {
    let query = params.package_name.trim();
    if query.is_empty() {
        return Err(Error::InvalidInput("packageName cannot be empty".into()).into());
    }

    tracing::info!(tool = "search_package", query, "tool call");

    let packages = source.search(query).await?;
    let text = render_results(packages)?;

    Ok(CallToolResult::success(vec![Content::text(text)]))
}
