//! `file:` URI resolution: local filesystem reads.

use std::path::Path;

use voidlight_protocol::McpError;
use voidlight_stream::StreamInfo;

/// Strips the `file://` prefix (handling both `file:///path` and the
/// empty-authority form `file:/path`) and reads the referenced path.
pub fn resolve_file_uri(uri: &str) -> Result<(Vec<u8>, StreamInfo), McpError> {
    let path_str = strip_file_scheme(uri)
        .ok_or_else(|| McpError::InvalidRequest("not a file: URI".into()))?;
    let path = Path::new(&path_str);

    let bytes = std::fs::read(path)
        .map_err(|e| McpError::UriFetchError(format!("failed to read {path_str}: {e}")))?;

    let filename = path
        .file_name()
        .map(|f| f.to_string_lossy().to_string());
    let extension = path
        .extension()
        .map(|e| e.to_string_lossy().to_string());

    let mut info = StreamInfo::new().with_local_path(path_str.clone());
    if let Some(name) = filename {
        info = info.with_filename(name);
    }
    if let Some(ext) = extension {
        info = info.with_extension(ext);
    }

    Ok((bytes, info))
}

fn strip_file_scheme(uri: &str) -> Option<String> {
    let rest = uri.strip_prefix("file:")?;
    // file:///abs/path -> authority is empty, path starts with the third slash
    // file://host/path is not meaningfully supported locally; treat host as part of path
    let path = if let Some(p) = rest.strip_prefix("///") {
        format!("/{p}")
    } else if let Some(p) = rest.strip_prefix("//") {
        p.to_string()
    } else {
        rest.to_string()
    };
    Some(path)
}
