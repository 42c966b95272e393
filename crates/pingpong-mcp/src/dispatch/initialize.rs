//! Handles the `initialize` MCP method.

use serde_json::Value;
use tracing::info;

use pingpong_protocol::mcp::initialize::{Implementation, InitializeParams, InitializeResult};
use pingpong_protocol::RequestId;

use super::{invalid_params, respond};
use crate::handler::JsonRpcOutput;

/// Handles the `initialize` request and returns the server capabilities.
pub(crate) fn handle_initialize(
    id: RequestId,
    params: &Option<Value>,
    server_info: &Implementation,
) -> JsonRpcOutput {
    if let Some(p) = params {
        match serde_json::from_value::<InitializeParams>(p.clone()) {
            Ok(init) => info!(
                client = %init.client_info.name,
                client_version = %init.client_info.version,
                protocol_version = %init.protocol_version,
                "host initializing session"
            ),
            Err(e) => return invalid_params(id, format!("invalid initialize params: {e}")),
        }
    }

    respond(id, &InitializeResult::tools_only(server_info.clone()))
}
