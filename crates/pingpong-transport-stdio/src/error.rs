//! Transport-layer error types.

use thiserror::Error;

/// Errors from the stdio transport layer.
///
/// All of these end the server loop; malformed messages do not, they are
/// answered with a JSON-RPC error instead.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Failed to read from stdin.
    #[error("read error: {0}")]
    Read(#[source] std::io::Error),
    /// Failed to write to stdout.
    #[error("write error: {0}")]
    Write(#[source] std::io::Error),
    /// A response could not be serialized.
    #[error("serialization error: {0}")]
    Serialize(String),
}
