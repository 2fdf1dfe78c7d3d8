//! Resolves a URI string into a seekable byte stream plus an initial
//! `StreamInfo` guess, dispatching on scheme.

pub mod data;
pub mod file;
pub mod http;

use std::io::Cursor;

use voidlight_protocol::McpError;
use voidlight_stream::{SeekableBuffer, StreamInfo, DEFAULT_SPILL_THRESHOLD};

pub struct ResolvedStream {
    pub buffer: SeekableBuffer,
    pub info: StreamInfo,
}

/// Resolves `uri`, dispatching by scheme. `data:` and `file:` resolve
/// synchronously; `http(s):` performs a network fetch.
pub async fn resolve(uri: &str) -> Result<ResolvedStream, McpError> {
    let scheme = uri
        .split_once(':')
        .map(|(scheme, _)| scheme)
        .ok_or_else(|| McpError::InvalidRequest(format!("URI has no scheme: {uri}")))?;

    let (bytes, info) = match scheme {
        "data" => data::resolve_data_uri(uri)?,
        "file" => file::resolve_file_uri(uri)?,
        "http" | "https" => http::resolve_http_uri(uri).await?,
        other => return Err(McpError::UnsupportedUriScheme(other.to_string())),
    };

    let buffer = SeekableBuffer::from_reader(Cursor::new(bytes), DEFAULT_SPILL_THRESHOLD)
        .map_err(|e| McpError::UriFetchError(format!("failed to buffer stream: {e}")))?;

    Ok(ResolvedStream { buffer, info })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;

    #[tokio::test]
    async fn resolves_a_plain_text_data_uri() {
        let resolved = resolve("data:text/plain;charset=utf-8,Hello%20World").await.unwrap();
        assert_eq!(resolved.info.mimetype.as_deref(), Some("text/plain"));
        let mut buf = resolved.buffer;
        let mut out = Vec::new();
        buf.read_to_end(&mut out).unwrap();
        assert_eq!(out, b"Hello World");
    }

    #[tokio::test]
    async fn unsupported_scheme_is_rejected() {
        match resolve("ftp://example.com/file").await {
            Err(McpError::UnsupportedUriScheme(scheme)) => assert_eq!(scheme, "ftp"),
            Err(other) => panic!("expected UnsupportedUriScheme, got {other:?}"),
            Ok(_) => panic!("expected an error"),
        }
    }
}
