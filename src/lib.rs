//! MCP server providing sandboxed filesystem tools.
//!
//! All operations are restricted to a set of allowed root directories
//! configured at server startup. Eight tools: read_file, write_file,
//! list_files, file_info, create_directory, delete_file, move_file,
//! copy_file.

use rmcp::{
    ErrorData, RoleServer, ServerHandler,
    handler::server::router::tool::ToolRouter,
    model::{
        CallToolRequestParam, CallToolResult, Content, Implementation, ListToolsResult,
        PaginatedRequestParam, ServerCapabilities, ServerInfo,
    },
    service::RequestContext,
};
use std::path::PathBuf;

pub mod config;
pub mod error;
pub mod handlers;
pub mod tools;
pub mod validate;

use error::FsError;

/// MCP filesystem server with directory-level access control.
#[derive(Debug, Clone)]
pub struct FsServer {
    pub(crate) allowed_dirs: Vec<PathBuf>,
    pub(crate) tool_router: ToolRouter<Self>,
}

impl FsServer {
    /// The allowed root directories, normalized.
    pub fn allowed_dirs(&self) -> &[PathBuf] {
        &self.allowed_dirs
    }
}

impl ServerHandler for FsServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: Default::default(),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "fsgate".into(),
                title: Some("Sandboxed Filesystem Server".into()),
                version: env!("CARGO_PKG_VERSION").into(),
                ..Default::default()
            },
            instructions: Some(
                "Filesystem server providing file and directory operations restricted to \
                 allowed root directories."
                    .into(),
            ),
        }
    }

    /// Dispatch a tool call by exact name.
    ///
    /// Failures — including unknown tool names and parameter schema
    /// mismatches — are rendered as error-flagged text results, never as
    /// protocol-level faults.
    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, ErrorData> {
        if !self.tool_router.has_route(request.name.as_ref()) {
            tracing::warn!(tool = %request.name, "unknown tool requested");
            let err = FsError::UnknownTool(request.name.to_string());
            return Ok(CallToolResult::error(vec![Content::text(err.to_string())]));
        }
        tracing::debug!(tool = %request.name, "dispatching tool call");
        let context = rmcp::handler::server::tool::ToolCallContext::new(self, request, context);
        match self.tool_router.call(context).await {
            Ok(result) => Ok(result),
            Err(err) => Ok(CallToolResult::error(vec![Content::text(
                err.message.to_string(),
            )])),
        }
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, ErrorData> {
        Ok(ListToolsResult {
            meta: None,
            next_cursor: None,
            tools: self.tool_router.list_all(),
        })
    }
}
