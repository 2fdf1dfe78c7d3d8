//! The output of a single converter invocation.

use std::collections::HashMap;

/// The product of converting one stream. Empty markdown is legal — a
/// silent audio file, or a zero-length input, both convert cleanly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConverterResult {
    pub markdown: String,
    pub title: Option<String>,
    pub metadata: Option<HashMap<String, String>>,
}

impl ConverterResult {
    pub fn new(markdown: impl Into<String>) -> Self {
        Self {
            markdown: markdown.into(),
            title: None,
            metadata: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_metadata(mut self, metadata: HashMap<String, String>) -> Self {
        self.metadata = Some(metadata);
        self
    }
}
