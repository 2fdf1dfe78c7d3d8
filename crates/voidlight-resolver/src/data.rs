//! `data:` URI decoding per RFC 2397.

use voidlight_protocol::McpError;
use voidlight_stream::StreamInfo;

/// Parses and decodes a `data:[<mediatype>][;base64],<data>` URI.
pub fn resolve_data_uri(uri: &str) -> Result<(Vec<u8>, StreamInfo), McpError> {
    let rest = uri
        .strip_prefix("data:")
        .ok_or_else(|| McpError::InvalidRequest("not a data: URI".into()))?;

    let comma = rest
        .find(',')
        .ok_or_else(|| McpError::UriFetchError("malformed data URI: missing comma".into()))?;
    let (header, payload) = rest.split_at(comma);
    let payload = &payload[1..];

    let is_base64 = header.ends_with(";base64");
    let mediatype = if is_base64 {
        header.trim_end_matches(";base64")
    } else {
        header
    };

    let (mimetype, charset) = split_mediatype(mediatype);

    let bytes = if is_base64 {
        use base64::Engine;
        base64::engine::general_purpose::STANDARD
            .decode(payload)
            .map_err(|e| McpError::UriFetchError(format!("invalid base64 payload: {e}")))?
    } else {
        urlencoding::decode_binary(payload.as_bytes()).into_owned()
    };

    let mut info = StreamInfo::new();
    if let Some(m) = mimetype {
        info = info.with_mimetype(m);
    }
    if let Some(c) = charset {
        info = info.with_charset(c);
    }

    Ok((bytes, info))
}

/// Splits `text/plain;charset=utf-8` into `(Some("text/plain"), Some("utf-8"))`.
/// Unknown parameters are preserved in the mimetype and otherwise ignored.
fn split_mediatype(mediatype: &str) -> (Option<String>, Option<String>) {
    if mediatype.is_empty() {
        return (Some("text/plain".to_string()), Some("us-ascii".to_string()));
    }

    let mut mimetype_parts = Vec::new();
    let mut charset = None;
    for part in mediatype.split(';') {
        if let Some(value) = part.strip_prefix("charset=") {
            charset = Some(value.to_string());
        } else {
            mimetype_parts.push(part);
        }
    }

    let mimetype = mimetype_parts.first().map(|s| s.to_string());
    (mimetype, charset)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_percent_encoded_plain_text() {
        let (bytes, info) = resolve_data_uri("data:text/plain;charset=utf-8,Hello%20World").unwrap();
        assert_eq!(bytes, b"Hello World");
        assert_eq!(info.mimetype.as_deref(), Some("text/plain"));
        assert_eq!(info.charset.as_deref(), Some("utf-8"));
    }

    #[test]
    fn decodes_base64_payload() {
        let (bytes, info) = resolve_data_uri("data:text/plain;base64,SGVsbG8=").unwrap();
        assert_eq!(bytes, b"Hello");
        assert_eq!(info.mimetype.as_deref(), Some("text/plain"));
    }

    #[test]
    fn html_without_charset_decodes_mimetype_only() {
        let (bytes, info) =
            resolve_data_uri("data:text/html,<h1>Title</h1><p>Body</p>").unwrap();
        assert_eq!(bytes, b"<h1>Title</h1><p>Body</p>");
        assert_eq!(info.mimetype.as_deref(), Some("text/html"));
    }

    #[test]
    fn missing_comma_is_an_error() {
        assert!(resolve_data_uri("data:text/plain;base64").is_err());
    }
}
