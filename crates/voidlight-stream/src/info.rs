//! `StreamInfo`: everything known about a byte stream, and nothing else.

use serde::{Deserialize, Serialize};

/// Immutable descriptor of a byte stream. Every field is optional; the
/// dispatcher only ever reads a `StreamInfo`, it never mutates one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamInfo {
    pub mimetype: Option<String>,
    /// Canonical lowercase extension with a leading dot, e.g. `.csv`.
    pub extension: Option<String>,
    pub charset: Option<String>,
    pub filename: Option<String>,
    pub local_path: Option<String>,
    pub url: Option<String>,
}

impl StreamInfo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_mimetype(mut self, mimetype: impl Into<String>) -> Self {
        self.mimetype = Some(mimetype.into());
        self
    }

    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = Some(normalize_extension(&extension.into()));
        self
    }

    pub fn with_charset(mut self, charset: impl Into<String>) -> Self {
        self.charset = Some(charset.into());
        self
    }

    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = Some(filename.into());
        self
    }

    pub fn with_local_path(mut self, local_path: impl Into<String>) -> Self {
        self.local_path = Some(local_path.into());
        self
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Apply a sequence of overrides left-to-right: any field set in an
    /// override replaces the corresponding field in the accumulator,
    /// absent fields are retained from whatever came before.
    pub fn copy_and_update(&self, overrides: &[StreamInfo]) -> StreamInfo {
        let mut result = self.clone();
        for over in overrides {
            if over.mimetype.is_some() {
                result.mimetype = over.mimetype.clone();
            }
            if over.extension.is_some() {
                result.extension = over.extension.clone();
            }
            if over.charset.is_some() {
                result.charset = over.charset.clone();
            }
            if over.filename.is_some() {
                result.filename = over.filename.clone();
            }
            if over.local_path.is_some() {
                result.local_path = over.local_path.clone();
            }
            if over.url.is_some() {
                result.url = over.url.clone();
            }
        }
        result
    }
}

pub fn normalize_extension(ext: &str) -> String {
    let trimmed = ext.trim_start_matches('.').to_lowercase();
    format!(".{trimmed}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn copy_and_update_overrides_only_set_fields() {
        let base = StreamInfo::new().with_mimetype("text/plain").with_charset("utf-8");
        let override1 = StreamInfo::new().with_mimetype("text/html");
        let merged = base.copy_and_update(&[override1]);
        assert_eq!(merged.mimetype.as_deref(), Some("text/html"));
        assert_eq!(merged.charset.as_deref(), Some("utf-8"));
    }

    #[test]
    fn copy_and_update_is_idempotent_on_identical_overrides() {
        let base = StreamInfo::new().with_mimetype("text/plain");
        let over = StreamInfo::new().with_extension("txt");
        let once = base.copy_and_update(&[over.clone()]);
        let twice = once.copy_and_update(&[over]);
        assert_eq!(once, twice);
    }

    #[test]
    fn extension_is_normalized_to_lowercase_with_leading_dot() {
        let info = StreamInfo::new().with_extension("CSV");
        assert_eq!(info.extension.as_deref(), Some(".csv"));
    }
}
