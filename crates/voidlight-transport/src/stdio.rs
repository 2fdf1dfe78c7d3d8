//! Line-delimited JSON-RPC over stdin/stdout. One request per line, one
//! response per line, no framing prelude. Logging must never touch
//! stdout — only stderr, via `tracing`, or it corrupts the stream.

use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use voidlight_json_rpc::{JsonRpcDispatcher, JsonRpcMessage};
use voidlight_protocol::McpError;

use crate::framing::{parse_incoming, serialize_message, IncomingMessage};

/// Runs until stdin hits EOF, then returns cleanly.
pub async fn run_stdio<R, W>(
    dispatcher: Arc<JsonRpcDispatcher<McpError>>,
    stdin: R,
    mut stdout: W,
) -> std::io::Result<()>
where
    R: tokio::io::AsyncRead + Unpin,
    W: tokio::io::AsyncWrite + Unpin,
{
    let mut lines = BufReader::new(stdin).lines();
    let mut initialized = false;

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }

        match parse_incoming(&line) {
            Ok(IncomingMessage::Request(request)) => {
                let is_initialize = request.method == "initialize";
                let response = dispatcher.handle_request(request, initialized).await;
                if is_initialize && matches!(response, JsonRpcMessage::Response(_)) {
                    initialized = true;
                }
                write_line(&mut stdout, &serialize_message(&response)).await?;
            }
            Ok(IncomingMessage::Notification(notification)) => {
                dispatcher.handle_notification(notification).await;
            }
            Err(parse_error) => {
                let message = JsonRpcMessage::Error(parse_error);
                write_line(&mut stdout, &serialize_message(&message)).await?;
            }
        }
    }

    Ok(())
}

async fn write_line<W: tokio::io::AsyncWrite + Unpin>(
    stdout: &mut W,
    line: &str,
) -> std::io::Result<()> {
    stdout.write_all(line.as_bytes()).await?;
    stdout.write_all(b"\n").await?;
    stdout.flush().await
}
