//! `http:`/`https:` URI resolution: fetch with redirect handling.

use std::time::Duration;

use voidlight_protocol::McpError;
use voidlight_stream::StreamInfo;

const REDIRECT_LIMIT: usize = 10;
const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

pub async fn resolve_http_uri(uri: &str) -> Result<(Vec<u8>, StreamInfo), McpError> {
    let client = reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::limited(REDIRECT_LIMIT))
        .timeout(FETCH_TIMEOUT)
        .build()
        .map_err(|e| McpError::UriFetchError(format!("failed to build HTTP client: {e}")))?;

    let response = client
        .get(uri)
        .send()
        .await
        .map_err(|e| McpError::UriFetchError(format!("request to {uri} failed: {e}")))?;

    let final_url = response.url().to_string();

    if !response.status().is_success() {
        return Err(McpError::UriFetchError(format!(
            "{uri} returned HTTP {}",
            response.status()
        )));
    }

    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    let content_disposition_filename = response
        .headers()
        .get(reqwest::header::CONTENT_DISPOSITION)
        .and_then(|v| v.to_str().ok())
        .and_then(filename_from_content_disposition);

    let mut info = StreamInfo::new().with_url(final_url.clone());

    if let Some(ct) = content_type {
        let (mimetype, charset) = split_content_type(&ct);
        if let Some(m) = mimetype {
            info = info.with_mimetype(m);
        }
        if let Some(c) = charset {
            info = info.with_charset(c);
        }
    }

    let filename = content_disposition_filename.or_else(|| filename_from_url(&final_url));
    if let Some(name) = filename {
        info = info.with_filename(name);
    }

    let bytes = response
        .bytes()
        .await
        .map_err(|e| McpError::UriFetchError(format!("failed to read response body: {e}")))?
        .to_vec();

    Ok((bytes, info))
}

fn split_content_type(content_type: &str) -> (Option<String>, Option<String>) {
    let mut parts = content_type.split(';');
    let mimetype = parts.next().map(|s| s.trim().to_string());
    let charset = parts
        .find_map(|p| p.trim().strip_prefix("charset=").map(|v| v.trim_matches('"').to_string()));
    (mimetype, charset)
}

fn filename_from_content_disposition(header: &str) -> Option<String> {
    header.split(';').find_map(|part| {
        let part = part.trim();
        part.strip_prefix("filename=")
            .map(|v| v.trim_matches('"').to_string())
    })
}

fn filename_from_url(url: &str) -> Option<String> {
    url::Url::parse(url)
        .ok()
        .and_then(|u| u.path_segments().and_then(|mut s| s.next_back().map(str::to_string)))
        .filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_content_type_and_charset() {
        let (mime, charset) = split_content_type("text/html; charset=UTF-8");
        assert_eq!(mime.as_deref(), Some("text/html"));
        assert_eq!(charset.as_deref(), Some("UTF-8"));
    }

    #[test]
    fn extracts_filename_from_content_disposition() {
        let name = filename_from_content_disposition("attachment; filename=\"report.csv\"");
        assert_eq!(name.as_deref(), Some("report.csv"));
    }

    #[test]
    fn falls_back_to_final_url_segment_for_filename() {
        let name = filename_from_url("https://example.com/docs/report.csv");
        assert_eq!(name.as_deref(), Some("report.csv"));
    }
}
