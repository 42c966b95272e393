//! MCP server loop over stdio transport.
//!
//! Reads JSON-RPC messages line by line, dispatches them via
//! `McpHandler`, and writes responses back. Requests get exactly one
//! response; notifications (no `id`) get none. Messages are processed
//! strictly one at a time.

use tracing::{debug, error, info, warn};

use pingpong_mcp::{JsonRpcOutput, McpHandler};
use pingpong_protocol::{JsonRpcErrorResponse, JsonRpcMessage};

use crate::error::TransportError;
use crate::transport::StdioTransport;

/// MCP server that reads from a transport and dispatches to a handler.
pub struct McpServer<R, W> {
    transport: StdioTransport<R, W>,
    handler: McpHandler,
}

impl<R, W> McpServer<R, W>
where
    R: tokio::io::AsyncRead + Unpin,
    W: tokio::io::AsyncWrite + Unpin,
{
    /// Creates a new server with the given transport and handler.
    pub fn new(transport: StdioTransport<R, W>, handler: McpHandler) -> Self {
        Self { transport, handler }
    }

    /// Runs the server loop until the input stream is closed.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] if reading or writing fails. Malformed
    /// messages are answered and do not stop the loop.
    pub async fn run(&mut self) -> Result<(), TransportError> {
        info!(server = %self.handler.server_info().name, "MCP server listening on stdio");

        loop {
            // 1. Read and decode the next message
            let decoded = match self.transport.read_message().await? {
                Some(line) => JsonRpcMessage::from_slice(line),
                None => {
                    info!("stdin closed, shutting down");
                    return Ok(());
                }
            };

            // 2. Dispatch
            match decoded {
                Ok(JsonRpcMessage::Request(request)) => {
                    debug!(method = %request.method, id = %request.id, "received request");
                    let output = self.handler.dispatch(&request).await;
                    self.write_output(&output).await?;
                }
                Ok(JsonRpcMessage::Notification(notif)) => {
                    debug!(method = %notif.method, "received notification");
                    self.handler.handle_notification(&notif);
                }
                Err(e) => {
                    warn!(error = %e, "failed to decode JSON-RPC message");
                    // The id of an undecodable message is unknown.
                    let err = JsonRpcErrorResponse::error(None, e.code(), e.to_string());
                    self.write_output(&JsonRpcOutput::Error(err)).await?;
                }
            }
        }
    }

    /// Serializes and writes a JSON-RPC output to the transport.
    async fn write_output(&mut self, output: &JsonRpcOutput) -> Result<(), TransportError> {
        match output.to_json() {
            Ok(json) => self.transport.write_message(&json).await,
            Err(e) => {
                error!(error = %e, "failed to serialize response");
                Err(TransportError::Serialize(e.to_string()))
            }
        }
    }
}
