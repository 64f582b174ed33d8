//! MCP server handler implementation.
//!
//! This module defines the main server handler that
//! routes tool calls to the appropriate implementations.
use crate::tools::{
    BoardParams, DetailsParams, board::board_impl, details::details_impl, metrics::metrics_impl, years::years_impl,
};

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
use ustawka_core::ActService;

/// The main MCP server handler for ustawka.
#[derive(Clone)]
pub struct UstawkaServer {
    service: ActService,
    tool_router: ToolRouter<Self>,
}

/// Tool router implementation using the #[tool_router] macro.
///
/// This macro generates the routing logic that maps tool names to handler methods.
#[tool_router]
impl UstawkaServer {
    /// Create a new server handler around the act service.
    pub fn new(service: ActService) -> Self {
        Self { service, tool_router: Self::tool_router() }
    }

    #[tool(description = "List the years (2021 onwards) that have acts published in the Journal of Laws. Returns a JSON array of years.")]
    async fn acts_years(&self) -> Result<CallToolResult, McpError> {
        years_impl(&self.service).await
    }

    /// Acts of one year grouped by status.
    ///
    /// Columns: `Obowiazujace` (in force), `Pending` (anything else, with an
    /// empty status shown as "W przygotowaniu") and `Uchylone` (repealed).
    #[tool(description = "Acts published in a given year, grouped by status into Obowiazujace, Pending and Uchylone columns.")]
    async fn acts_board(&self, params: Parameters<BoardParams>) -> Result<CallToolResult, McpError> {
        board_impl(&self.service, params.0).await
    }

    #[tool(description = "Full record of one act (DU/<year>/<position>): dates, keywords, text versions and references to related acts.")]
    async fn act_details(&self, params: Parameters<DetailsParams>) -> Result<CallToolResult, McpError> {
        details_impl(&self.service, params.0).await
    }

    #[tool(description = "Request, registry and cache counters since the server started.")]
    async fn metrics(&self) -> Result<CallToolResult, McpError> {
        metrics_impl(&self.service)
    }
}

impl ServerHandler for UstawkaServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            server_info: Implementation {
                name: "ustawka".into(),
                version: env!("CARGO_PKG_VERSION").into(),
                ..Default::default()
            },
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            instructions: Some("Browse Polish legislative acts from the Sejm ELI registry, cached locally.".into()),
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
