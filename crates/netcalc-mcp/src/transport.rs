//! MCP Server Transports
//!
//! Line-delimited JSON-RPC over STDIO.

use crate::{McpError, McpServer, Result};
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{debug, info};

/// STDIO transport for MCP server
///
/// Reads JSON-RPC requests from stdin and writes responses to stdout.
pub struct StdioTransport {
    server: Arc<McpServer>,
}

impl StdioTransport {
    /// Create new STDIO transport
    pub fn new(server: Arc<McpServer>) -> Self {
        Self { server }
    }

    /// Run the STDIO transport (async)
    pub async fn run_async(&self) -> Result<()> {
        let stdin = BufReader::new(tokio::io::stdin());
        let stdout = tokio::io::stdout();
        self.serve(stdin, stdout).await
    }

    /// Serve requests from `reader` until EOF, one response line per request
    pub async fn serve<R, W>(&self, mut reader: R, mut writer: W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        info!("JSON-RPC server ready");
        let mut buf = Vec::new();
        let mut handled = 0usize;

        loop {
            buf.clear();
            let n = reader
                .read_until(b'\n', &mut buf)
                .await
                .map_err(|e| McpError::InternalError(e.to_string()))?;

            // EOF
            if n == 0 {
                break;
            }

            // Invalid UTF-8 decodes to replacement characters and is then
            // answered as a JSON parse error.
            let line = String::from_utf8_lossy(&buf);
            if line.trim().is_empty() {
                continue;
            }

            let response = self.server.handle_request(&line)?;
            handled += 1;

            writer
                .write_all(response.as_bytes())
                .await
                .map_err(|e| McpError::InternalError(e.to_string()))?;
            writer
                .write_all(b"\n")
                .await
                .map_err(|e| McpError::InternalError(e.to_string()))?;
            writer
                .flush()
                .await
                .map_err(|e| McpError::InternalError(e.to_string()))?;
        }

        debug!(handled, "input closed, shutting down");
        Ok(())
    }
}
