//! MCP method dispatch functions.
//!
//! Each sub-module handles one MCP method as a free function,
//! keeping `McpHandler` itself thin (struct + routing only).

pub(crate) mod initialize;
pub(crate) mod tools_call;
pub(crate) mod tools_list;

use serde::Serialize;

use pingpong_protocol::{error_codes, JsonRpcErrorResponse, JsonRpcResponse, RequestId};

use crate::handler::JsonRpcOutput;

/// Serializes a method result into a success response.
pub(crate) fn respond<T: Serialize>(id: RequestId, result: &T) -> JsonRpcOutput {
    match serde_json::to_value(result) {
        Ok(v) => JsonRpcOutput::Success(JsonRpcResponse::success(id, v)),
        Err(e) => JsonRpcOutput::Error(JsonRpcErrorResponse::error(
            id,
            error_codes::INTERNAL_ERROR,
            e.to_string(),
        )),
    }
}

/// Builds an `invalid params` error response.
pub(crate) fn invalid_params(id: RequestId, message: impl Into<String>) -> JsonRpcOutput {
    JsonRpcOutput::Error(JsonRpcErrorResponse::error(
        id,
        error_codes::INVALID_PARAMS,
        message,
    ))
}
