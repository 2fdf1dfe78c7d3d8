//! Fall-through converter: anything sniffed as `text/*` (or nothing at
//! all) is emitted verbatim. Registered at the generic priority tier so
//! specific converters get first refusal.

use std::io::Read;

use voidlight_protocol::{McpError, McpResult};
use voidlight_stream::{ConverterResult, StreamInfo};

use crate::registry::Converter;

pub struct PlainTextConverter;

impl Converter for PlainTextConverter {
    fn name(&self) -> &'static str {
        "plaintext"
    }

    fn accepts(&self, _head: &[u8], info: &StreamInfo) -> bool {
        match &info.mimetype {
            Some(mime) => mime.starts_with("text/") && mime != "text/html" && mime != "text/csv",
            None => true,
        }
    }

    fn convert(&self, stream: &mut dyn Read, _info: &StreamInfo) -> McpResult<ConverterResult> {
        let mut bytes = Vec::new();
        stream
            .read_to_end(&mut bytes)
            .map_err(|e| McpError::FileConversionError(e.to_string()))?;
        let text = String::from_utf8_lossy(&bytes).into_owned();
        Ok(ConverterResult::new(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_untyped_streams() {
        let converter = PlainTextConverter;
        assert!(converter.accepts(b"hello", &StreamInfo::default()));
    }

    #[test]
    fn declines_html_and_csv() {
        let converter = PlainTextConverter;
        let html = StreamInfo::default().with_mimetype("text/html");
        let csv = StreamInfo::default().with_mimetype("text/csv");
        assert!(!converter.accepts(b"", &html));
        assert!(!converter.accepts(b"", &csv));
    }

    #[test]
    fn converts_bytes_to_markdown_verbatim() {
        let converter = PlainTextConverter;
        let mut cursor = std::io::Cursor::new(b"hello world".to_vec());
        let result = converter.convert(&mut cursor, &StreamInfo::default()).unwrap();
        assert_eq!(result.markdown, "hello world");
    }
}
