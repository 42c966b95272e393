//! Handles the `tools/call` MCP method.
//!
//! Tool failures never become JSON-RPC errors: they are reported as a
//! `CallToolResult` with `isError: true`, so the host's session continues.
//! JSON-RPC errors are reserved for malformed `params`.

use serde_json::{json, Value};

use pingpong_protocol::mcp::tools::{ToolsCallParams, ToolsCallResult};
use pingpong_protocol::RequestId;
use pingpong_tools::{Dispatcher, InvocationRequest, InvocationResult};
use pingpong_types::{timestamp, ToolError};

use super::{invalid_params, respond};
use crate::handler::JsonRpcOutput;

/// Handles the `tools/call` request.
pub(crate) fn handle_tools_call(
    id: RequestId,
    params: &Option<Value>,
    dispatcher: &Dispatcher,
) -> JsonRpcOutput {
    // 1. Parse params
    let call_params = match params {
        Some(p) => match serde_json::from_value::<ToolsCallParams>(p.clone()) {
            Ok(cp) => cp,
            Err(e) => return invalid_params(id, format!("invalid tools/call params: {e}")),
        },
        None => return invalid_params(id, "tools/call requires params"),
    };

    // 2. Dispatch
    let request = InvocationRequest::new(call_params.name, call_params.arguments);
    let result = dispatcher.handle_invoke(&request);

    // 3. Wrap in an MCP envelope
    respond(id, &to_call_result(result))
}

/// Renders an invocation outcome as a single pretty-printed text block.
pub(crate) fn to_call_result(result: InvocationResult) -> ToolsCallResult {
    match result {
        InvocationResult::Success { payload } => match serde_json::to_string_pretty(&payload) {
            Ok(text) => ToolsCallResult::text(text),
            Err(e) => error_result(&ToolError::execution(e.to_string())),
        },
        InvocationResult::Failure(err) => error_result(&err),
    }
}

fn error_result(err: &ToolError) -> ToolsCallResult {
    let body = json!({
        "error": err.message,
        "code": err.code,
        "timestamp": timestamp::now(),
    });
    // A `Value` built from strings always serializes.
    let text = serde_json::to_string_pretty(&body).unwrap_or_else(|_| err.message.clone());
    ToolsCallResult::error_text(text)
}
