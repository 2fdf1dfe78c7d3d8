//! The dispatch algorithm: sniff the head, probe registrations in
//! priority order, rewind between every probe and before the winning
//! `convert` call.

use std::io::{Read, Seek, SeekFrom};
use std::sync::Arc;

use voidlight_protocol::{McpError, McpResult};
use voidlight_sniffer::sniff;
use voidlight_stream::{ConverterResult, StreamInfo};

use crate::converters::{CsvConverter, HtmlConverter, PlainTextConverter};
use crate::registry::{ConverterRegistry, PRIORITY_GENERIC, PRIORITY_SPECIFIC};

pub const HEAD_READ_SIZE: usize = 8 * 1024;

pub struct Dispatcher {
    registry: ConverterRegistry,
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl Dispatcher {
    /// Registers the built-in converters at their canonical priorities.
    /// Plugin registrations append after construction via `registry_mut`.
    pub fn new() -> Self {
        let mut registry = ConverterRegistry::new();
        registry.register(Arc::new(HtmlConverter), PRIORITY_SPECIFIC);
        registry.register(Arc::new(CsvConverter), PRIORITY_SPECIFIC);
        registry.register(Arc::new(PlainTextConverter), PRIORITY_GENERIC);
        Self { registry }
    }

    pub fn registry_mut(&mut self) -> &mut ConverterRegistry {
        &mut self.registry
    }

    pub fn dispatch<S: Read + Seek>(
        &self,
        stream: &mut S,
        seed_info: &StreamInfo,
    ) -> McpResult<ConverterResult> {
        let entry = stream
            .stream_position()
            .map_err(|e| McpError::FileConversionError(e.to_string()))?;

        let mut head = vec![0u8; HEAD_READ_SIZE];
        let read = read_up_to(stream, &mut head)
            .map_err(|e| McpError::FileConversionError(e.to_string()))?;
        head.truncate(read);
        stream
            .seek(SeekFrom::Start(entry))
            .map_err(|e| McpError::FileConversionError(e.to_string()))?;

        let info = sniff(&head, seed_info);

        for registration in self.registry.iter() {
            stream
                .seek(SeekFrom::Start(entry))
                .map_err(|e| McpError::FileConversionError(e.to_string()))?;
            if !registration.converter.accepts(&head, &info) {
                continue;
            }
            stream
                .seek(SeekFrom::Start(entry))
                .map_err(|e| McpError::FileConversionError(e.to_string()))?;
            match registration.converter.convert(stream, &info) {
                Ok(result) => return Ok(result),
                Err(McpError::UnsupportedFormatError(_)) => continue,
                Err(McpError::MissingDependencyError(hint)) => {
                    tracing::warn!(converter = %registration.converter.name(), %hint, "skipping converter, missing optional dependency");
                    continue;
                }
                Err(other) => return Err(McpError::FileConversionError(other.to_string())),
            }
        }

        Err(McpError::UnsupportedFormatError(format!("{info:?}")))
    }
}

fn read_up_to<R: Read>(reader: &mut R, buf: &mut [u8]) -> std::io::Result<usize> {
    let mut total = 0;
    while total < buf.len() {
        let n = reader.read(&mut buf[total..])?;
        if n == 0 {
            break;
        }
        total += n;
    }
    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{Converter, PRIORITY_SPECIFIC};
    use std::io::Cursor;

    struct MissingDependencyConverter;

    impl Converter for MissingDependencyConverter {
        fn name(&self) -> &'static str {
            "missing-dependency"
        }

        fn accepts(&self, _head: &[u8], _info: &StreamInfo) -> bool {
            true
        }

        fn convert(&self, _stream: &mut dyn Read, _info: &StreamInfo) -> McpResult<ConverterResult> {
            Err(McpError::MissingDependencyError("libreoffice".to_string()))
        }
    }

    struct ExplodingConverter;

    impl Converter for ExplodingConverter {
        fn name(&self) -> &'static str {
            "exploding"
        }

        fn accepts(&self, _head: &[u8], _info: &StreamInfo) -> bool {
            true
        }

        fn convert(&self, _stream: &mut dyn Read, _info: &StreamInfo) -> McpResult<ConverterResult> {
            Err(McpError::InvalidRequest("malformed payload".to_string()))
        }
    }

    #[test]
    fn dispatches_html_to_the_html_converter() {
        let dispatcher = Dispatcher::new();
        let mut cursor = Cursor::new(b"<html><body><h1>Hi</h1></body></html>".to_vec());
        let result = dispatcher.dispatch(&mut cursor, &StreamInfo::default()).unwrap();
        assert!(result.markdown.contains("# Hi"));
    }

    #[test]
    fn dispatches_csv_by_extension_hint() {
        let dispatcher = Dispatcher::new();
        let mut cursor = Cursor::new(b"a,b\n1,2\n".to_vec());
        let info = StreamInfo::default().with_extension("csv");
        let result = dispatcher.dispatch(&mut cursor, &info).unwrap();
        assert!(result.markdown.contains("| a | b |"));
    }

    #[test]
    fn falls_through_to_plaintext_for_untyped_streams() {
        let dispatcher = Dispatcher::new();
        let mut cursor = Cursor::new(b"just some text".to_vec());
        let result = dispatcher.dispatch(&mut cursor, &StreamInfo::default()).unwrap();
        assert_eq!(result.markdown, "just some text");
    }

    #[test]
    fn rewinds_between_probes_so_later_converters_see_the_full_head() {
        let dispatcher = Dispatcher::new();
        let mut cursor = Cursor::new(b"name,value\nfoo,1\n".to_vec());
        let info = StreamInfo::default().with_mimetype("text/csv");
        let result = dispatcher.dispatch(&mut cursor, &info).unwrap();
        assert!(result.markdown.contains("foo"));
    }

    #[test]
    fn missing_dependency_falls_through_to_the_next_candidate() {
        let mut dispatcher = Dispatcher::new();
        dispatcher
            .registry_mut()
            .register(Arc::new(MissingDependencyConverter), PRIORITY_SPECIFIC - 1.0);
        let mut cursor = Cursor::new(b"plain text body".to_vec());
        let result = dispatcher.dispatch(&mut cursor, &StreamInfo::default()).unwrap();
        assert_eq!(result.markdown, "plain text body");
    }

    #[test]
    fn other_converter_errors_are_wrapped_as_file_conversion_errors() {
        let mut dispatcher = Dispatcher::new();
        dispatcher
            .registry_mut()
            .register(Arc::new(ExplodingConverter), PRIORITY_SPECIFIC - 1.0);
        let mut cursor = Cursor::new(b"anything".to_vec());
        let err = dispatcher.dispatch(&mut cursor, &StreamInfo::default()).unwrap_err();
        assert!(matches!(err, McpError::FileConversionError(_)));
    }
}
