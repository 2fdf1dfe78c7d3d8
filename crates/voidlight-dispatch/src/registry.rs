//! Ordered registry of (converter, priority) pairs.

use std::sync::Arc;

use voidlight_protocol::McpResult;
use voidlight_stream::{ConverterResult, StreamInfo};

/// Probes the stream head and, if accepted, consumes it to produce Markdown.
pub trait Converter: Send + Sync {
    fn name(&self) -> &'static str;

    /// May read from `head`; must not assume the full stream is available.
    fn accepts(&self, head: &[u8], info: &StreamInfo) -> bool;

    /// Consumes `stream` fully. Declining mid-convert via
    /// `McpError::UnsupportedFormatError` is legal — the dispatcher treats
    /// it the same as a declined `accepts` and tries the next candidate.
    fn convert(
        &self,
        stream: &mut dyn std::io::Read,
        info: &StreamInfo,
    ) -> McpResult<ConverterResult>;
}

/// Lower priority runs earlier. Built-ins use the two canonical tiers;
/// third-party registrations typically preempt with values below 0.0.
pub const PRIORITY_SPECIFIC: f64 = 0.0;
pub const PRIORITY_GENERIC: f64 = 10.0;

pub struct ConverterRegistration {
    pub converter: Arc<dyn Converter>,
    pub priority: f64,
}

/// Owns all registrations. Immutable after startup except for plugin
/// registration, which is not on the hot path.
#[derive(Default)]
pub struct ConverterRegistry {
    registrations: Vec<ConverterRegistration>,
}

impl ConverterRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a registration; ties in priority break by insertion order,
    /// which a stable sort preserves.
    pub fn register(&mut self, converter: Arc<dyn Converter>, priority: f64) {
        self.registrations.push(ConverterRegistration { converter, priority });
        self.registrations
            .sort_by(|a, b| a.priority.partial_cmp(&b.priority).unwrap());
    }

    pub fn iter(&self) -> impl Iterator<Item = &ConverterRegistration> {
        self.registrations.iter()
    }
}
