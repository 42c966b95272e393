//! # pingpong-mcp
//!
//! MCP method dispatch handler.
//!
//! Provides `McpHandler` and `JsonRpcOutput` for routing JSON-RPC requests
//! to the operation dispatcher and wrapping its results in MCP envelopes.

mod dispatch;
pub mod handler;

pub use handler::{JsonRpcOutput, McpHandler};
