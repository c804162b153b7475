//! MCP server handler implementation.
//!
//! Routes tool calls to the implementations in [`crate::tools`].

use std::sync::Arc;

use crate::tools::details::{DetailsParams, details_impl};
use crate::tools::search_package::{SearchPackageParams, search_impl};
use godoc_client::PackageSource;

use rmcp::{
    ErrorData as McpError, ServerHandler,
    handler::server::{
        tool::{ToolCallContext, ToolRouter},
        wrapper::Parameters,
    },
    model::{
        CallToolRequestParam, CallToolResult, Implementation, ListToolsResult, PaginatedRequestParam, ProtocolVersion,
        ServerCapabilities, ServerInfo,
    },
    service::{RequestContext, RoleServer},
    tool, tool_router,
};

/// The MCP server handler for godoc-mcp.
#[derive(Clone)]
pub struct GoDocServer {
    source: Arc<dyn PackageSource>,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl GoDocServer {
    /// Create a handler that answers tool calls from `source`.
    pub fn new(source: Arc<dyn PackageSource>) -> Self {
        Self { source, tool_router: Self::tool_router() }
    }

    /// Search the Go package index.
    #[tool(description = "Search for Go packages by name or keyword. Returns candidate packages with their documentation URLs.")]
    async fn search_package(&self, params: Parameters<SearchPackageParams>) -> Result<CallToolResult, McpError> {
        search_impl(self.source.as_ref(), params.0).await
    }

    /// Fetch the documentation of one package.
    #[tool(
        description = "Get the documentation of a Go package as Markdown. Pass a URL returned by the search_package tool."
    )]
    async fn details(&self, params: Parameters<DetailsParams>) -> Result<CallToolResult, McpError> {
        details_impl(self.source.as_ref(), params.0).await
    }
}

impl ServerHandler for GoDocServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            server_info: Implementation {
                name: "godoc-mcp".into(),
                version: env!("CARGO_PKG_VERSION").into(),
                ..Default::default()
            },
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            instructions: Some(
                "Use search_package to find a Go package, then details with one of the returned URLs.".into(),
            ),
            ..Default::default()
        }
    }

    async fn list_tools(
        &self, _request: Option<PaginatedRequestParam>, _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, McpError> {
        Ok(ListToolsResult { meta: None, tools: self.tool_router.list_all(), next_cursor: None })
    }

    async fn call_tool(
        &self, request: CallToolRequestParam, context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        self.tool_router
            .call(ToolCallContext::new(self, request, context))
            .await
    }
}
