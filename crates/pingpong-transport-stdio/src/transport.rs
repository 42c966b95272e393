//! Line-delimited JSON transport over stdin/stdout.
//!
//! Each JSON-RPC message is a single line terminated by `\n`.
//! This is the MCP stdio framing. Nothing but
//! protocol messages may be written to the output stream.

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Stdin, Stdout};
use tracing::trace;

use crate::error::TransportError;

/// Reads JSON-RPC messages from a reader, writes responses to a writer.
///
/// Generic over reader/writer so tests can use in-memory buffers.
pub struct StdioTransport<R, W> {
    reader: BufReader<R>,
    writer: W,
    buf: Vec<u8>,
}

impl StdioTransport<Stdin, Stdout> {
    /// Transport bound to the process's stdin and stdout.
    pub fn stdio() -> Self {
        Self::new(tokio::io::stdin(), tokio::io::stdout())
    }
}

impl<R, W> StdioTransport<R, W>
where
    R: tokio::io::AsyncRead + Unpin,
    W: tokio::io::AsyncWrite + Unpin,
{
    /// Creates a new transport with the given reader and writer.
    pub fn new(reader: R, writer: W) -> Self {
        Self {
            reader: BufReader::new(reader),
            writer,
            buf: Vec::new(),
        }
    }

    /// Reads the next non-blank line as raw bytes, without surrounding
    /// ASCII whitespace. Decoding is left to the caller.
    ///
    /// Returns `None` on EOF (connection closed).
    pub async fn read_message(&mut self) -> Result<Option<&[u8]>, TransportError> {
        loop {
            self.buf.clear();
            let bytes_read = self
                .reader
                .read_until(b'\n', &mut self.buf)
                .await
                .map_err(TransportError::Read)?;

            if bytes_read == 0 {
                return Ok(None);
            }

            let (start, end) = trimmed_bounds(&self.buf);
            if start < end {
                trace!(len = end - start, "read message");
                return Ok(Some(&self.buf[start..end]));
            }
        }
    }

    /// Writes one message followed by `\n`, then flushes.
    pub async fn write_message(&mut self, message: &str) -> Result<(), TransportError> {
        trace!(len = message.len(), "writing message");

        self.writer
            .write_all(message.as_bytes())
            .await
            .map_err(TransportError::Write)?;
        self.writer
            .write_all(b"\n")
            .await
            .map_err(TransportError::Write)?;
        self.writer.flush().await.map_err(TransportError::Write)
    }

    /// Consumes the transport, returning the writer.
    pub fn into_writer(self) -> W {
        self.writer
    }
}

/// Bounds of `line` without leading and trailing ASCII whitespace.
fn trimmed_bounds(line: &[u8]) -> (usize, usize) {
    let start = line
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .unwrap_or(line.len());
    let end = line
        .iter()
        .rposition(|b| !b.is_ascii_whitespace())
        .map_or(start, |i| i + 1);
    (start, end)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn transport(input: &[u8]) -> StdioTransport<Cursor<Vec<u8>>, Vec<u8>> {
        StdioTransport::new(Cursor::new(input.to_vec()), Vec::new())
    }

    async fn next_line(t: &mut StdioTransport<Cursor<Vec<u8>>, Vec<u8>>) -> Option<Vec<u8>> {
        t.read_message().await.expect("read").map(<[u8]>::to_vec)
    }

    #[tokio::test]
    async fn read_single_line() {
        let mut t = transport(b"{\"jsonrpc\":\"2.0\"}\n");
        assert_eq!(next_line(&mut t).await.as_deref(), Some(&b"{\"jsonrpc\":\"2.0\"}"[..]));
    }

    #[tokio::test]
    async fn read_eof_returns_none() {
        let mut t = transport(b"");
        assert!(t.read_message().await.expect("read").is_none());
    }

    #[tokio::test]
    async fn blank_lines_are_skipped() {
        let mut t = transport(b"\n   \r\n  first  \n\nsecond");
        assert_eq!(next_line(&mut t).await.as_deref(), Some(&b"first"[..]));
        assert_eq!(next_line(&mut t).await.as_deref(), Some(&b"second"[..]));
        assert_eq!(next_line(&mut t).await, None);
    }

    #[tokio::test]
    async fn invalid_utf8_is_returned_not_an_error() {
        let mut t = transport(b"\xff\xfe\r\nnext\n");
        assert_eq!(next_line(&mut t).await.as_deref(), Some(&b"\xff\xfe"[..]));
        assert_eq!(next_line(&mut t).await.as_deref(), Some(&b"next"[..]));
    }

    #[tokio::test]
    async fn write_appends_newline() {
        let mut t = transport(b"");
        t.write_message("{\"ok\":true}").await.expect("write");
        t.write_message("{\"ok\":false}").await.expect("write");
        let output = String::from_utf8(t.into_writer()).expect("utf8");
        assert_eq!(output, "{\"ok\":true}\n{\"ok\":false}\n");
    }
}
