//! Handles the `tools/list` MCP method.

use pingpong_protocol::mcp::tools::{McpToolDefinition, ToolsListResult};
use pingpong_protocol::RequestId;
use pingpong_tools::Dispatcher;
use pingpong_types::OperationDefinition;

use super::respond;
use crate::handler::JsonRpcOutput;

/// Handles the `tools/list` request.
pub(crate) fn handle_tools_list(id: RequestId, dispatcher: &Dispatcher) -> JsonRpcOutput {
    let tools = dispatcher
        .handle_list()
        .into_iter()
        .map(to_mcp_definition)
        .collect();

    let result = ToolsListResult {
        tools,
        next_cursor: None,
    };
    respond(id, &result)
}

/// Converts an operation definition into its MCP wire form.
pub(crate) fn to_mcp_definition(def: &OperationDefinition) -> McpToolDefinition {
    McpToolDefinition {
        name: def.name().to_string(),
        description: Some(def.description().to_string()),
        input_schema: def.input_schema().to_json_schema(),
    }
}
