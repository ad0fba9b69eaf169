//! MCP server handler implementation.
//!
//! This module defines the main server handler that
//! routes tool calls to the appropriate implementations.
use std::sync::Arc;

use crate::tools::part_extract::{PartExtractParams, extract_impl};
use crate::tools::part_open::{PartOpenParams, open_impl};

use partscope_client::{FetchClient, FetchConfig};
use partscope_core::{AppConfig, Error};
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

/// The main MCP server handler for partscope.
#[derive(Clone)]
pub struct PartScopeServer {
    tool_router: ToolRouter<Self>,
    config: Arc<AppConfig>,
    fetcher: Arc<FetchClient>,
}

/// Tool router implementation using the #[tool_router] macro.
///
/// This macro generates the routing logic that maps tool names to handler methods.
#[tool_router]
impl PartScopeServer {
    /// Create a new server handler from a validated configuration.
    pub fn new(config: AppConfig) -> Result<Self, Error> {
        config.validate()?;
        let fetcher = FetchClient::new(FetchConfig::from_app(&config))?;
        Ok(Self { tool_router: Self::tool_router(), config: Arc::new(config), fetcher: Arc::new(fetcher) })
    }

    /// Extract a product record from part page HTML.
    ///
    /// No network requests are made.
    #[tool(description = "Extract structured product data (manufacturer, part number, offers, price breaks, \
                          specifications, similar parts) from the HTML of an electronic component detail page.")]
    async fn part_extract(&self, params: Parameters<PartExtractParams>) -> Result<CallToolResult, McpError> {
        extract_impl(&self.config, params.0).await
    }

    /// Fetch a part page and extract a product record from it.
    #[tool(description = "Fetch an electronic component detail page by URL and extract structured product data.")]
    async fn part_open(&self, params: Parameters<PartOpenParams>) -> Result<CallToolResult, McpError> {
        open_impl(&self.config, &self.fetcher, params.0).await
    }
}

impl ServerHandler for PartScopeServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            server_info: Implementation {
                name: "partscope".into(),
                version: env!("CARGO_PKG_VERSION").into(),
                ..Default::default()
            },
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }

    async fn list_tools(
        &self, _request: Option<PaginatedRequestParam>, _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, rmcp::model::ErrorData> {
        Ok(ListToolsResult { meta: None, tools: self.tool_router.list_all(), next_cursor: None })
    }

    async fn call_tool(
        &self, request: CallToolRequestParam, context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, rmcp::model::ErrorData> {
        self.tool_router
            .call(ToolCallContext::new(self, request, context))
            .await
    }
}
