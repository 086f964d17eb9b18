//! stdio transport for MCP JSON-RPC

use crate::DfHackServer;
use crate::transport::handle_message;
use dfhack_core::{DfHackError, Result};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{debug, info};

/// Run the MCP server on stdin/stdout until the client closes stdin
pub async fn run(server: &DfHackServer) -> Result<()> {
    info!("DFHack MCP server starting on stdio");
    run_with_io(server, BufReader::new(tokio::io::stdin()), tokio::io::stdout()).await
}

/// Serve newline-delimited JSON-RPC from `reader`, answering on `writer`
pub async fn run_with_io<R, W>(server: &DfHackServer, mut reader: R, mut writer: W) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut line = String::new();

    loop {
        line.clear();
        let bytes_read = reader
            .read_line(&mut line)
            .await
            .map_err(|e| DfHackError::Ipc(format!("Failed to read stdin: {}", e)))?;

        if bytes_read == 0 {
            // EOF - client disconnected
            info!("Client disconnected (EOF)");
            break;
        }

        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        debug!("Received: {}", trimmed);

        let Some(response) = handle_message(trimmed, server).await else {
            continue;
        };
        let response_json = serde_json::to_string(&response)?;

        debug!("Sending: {}", response_json);

        writer
            .write_all(response_json.as_bytes())
            .await
            .map_err(|e| DfHackError::Ipc(format!("Failed to write stdout: {}", e)))?;
        writer
            .write_all(b"\n")
            .await
            .map_err(|e| DfHackError::Ipc(format!("Failed to write newline: {}", e)))?;
        writer
            .flush()
            .await
            .map_err(|e| DfHackError::Ipc(format!("Failed to flush stdout: {}", e)))?;
    }

    Ok(())
}
