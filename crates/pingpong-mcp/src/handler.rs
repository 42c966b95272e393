//! JSON-RPC method router for the MCP server.

use serde_json::json;
use tracing::{debug, warn};

use pingpong_protocol::mcp::initialize::Implementation;
use pingpong_protocol::mcp::methods;
use pingpong_protocol::{
    error_codes, JsonRpcErrorResponse, JsonRpcNotification, JsonRpcRequest, JsonRpcResponse,
};
use pingpong_tools::Dispatcher;

use crate::dispatch::{initialize, tools_call, tools_list};

/// A response owed to the host: either a result or an error.
#[derive(Debug, Clone)]
pub enum JsonRpcOutput {
    /// Successful method result.
    Success(JsonRpcResponse),
    /// Protocol-level error.
    Error(JsonRpcErrorResponse),
}

impl JsonRpcOutput {
    /// Serializes the output to a single-line JSON string.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        match self {
            Self::Success(r) => serde_json::to_string(r),
            Self::Error(e) => serde_json::to_string(e),
        }
    }
}

/// Routes MCP methods to their handlers.
pub struct McpHandler {
    dispatcher: Dispatcher,
    server_info: Implementation,
}

impl McpHandler {
    /// Creates a handler that reports `server_name` during `initialize`.
    pub fn new(dispatcher: Dispatcher, server_name: impl Into<String>) -> Self {
        Self {
            dispatcher,
            server_info: Implementation {
                name: server_name.into(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
        }
    }

    /// Name and version advertised to the host.
    pub fn server_info(&self) -> &Implementation {
        &self.server_info
    }

    /// Dispatches a request and produces exactly one output.
    pub async fn dispatch(&self, request: &JsonRpcRequest) -> JsonRpcOutput {
        let id = request.id.clone();
        match request.method.as_str() {
            methods::INITIALIZE => {
                initialize::handle_initialize(id, &request.params, &self.server_info)
            }
            methods::PING => JsonRpcOutput::Success(JsonRpcResponse::success(id, json!({}))),
            methods::TOOLS_LIST => tools_list::handle_tools_list(id, &self.dispatcher),
            methods::TOOLS_CALL => {
                tools_call::handle_tools_call(id, &request.params, &self.dispatcher)
            }
            other => {
                warn!(method = %other, "unknown method");
                JsonRpcOutput::Error(JsonRpcErrorResponse::error(
                    id,
                    error_codes::METHOD_NOT_FOUND,
                    format!("unknown method: {other}"),
                ))
            }
        }
    }

    /// Handles a notification. Notifications never produce output.
    pub fn handle_notification(&self, notification: &JsonRpcNotification) {
        match notification.method.as_str() {
            methods::NOTIFICATIONS_INITIALIZED => debug!("host reported initialized"),
            methods::NOTIFICATIONS_CANCELLED => {
                // Calls complete synchronously, so there is nothing to cancel.
                debug!(params = ?notification.params, "cancellation ignored");
            }
            other => debug!(method = %other, "ignoring notification"),
        }
    }
}
