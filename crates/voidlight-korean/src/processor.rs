//! The stateful entry point: initializes once, shared read-only, safe for
//! concurrent use from any number of conversion tasks thereafter.

use crate::analysis::{
    analyze_formality, analyze_reading_difficulty, extract_keywords, extract_nouns,
    segment_sentences, Formality, FormalityCounts, ReadingDifficulty,
};
use crate::encoding::{smart_decode, DecodeResult};
use crate::hanja::hanja_to_hangul;
use crate::metadata::{extract_korean_metadata, KoreanMetadata};
use crate::morpheme::{HeuristicBackend, Morpheme, TokenizerBackend};
use crate::normalize::normalize_korean_text;

/// Holds the chosen tokenizer backend. Selection happens once, at
/// construction, and is logged — never retried per call.
pub struct KoreanTextProcessor {
    backend: Box<dyn TokenizerBackend>,
}

impl Default for KoreanTextProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl KoreanTextProcessor {
    /// Probes the tokenizer fallback ladder and fixes the choice. Only the
    /// always-available heuristic tier exists in this build; tiers 1/2
    /// would be probed for here if their runtimes were reachable.
    pub fn new() -> Self {
        let backend: Box<dyn TokenizerBackend> = Box::new(HeuristicBackend);
        tracing::info!(backend = backend.name(), "Korean tokenizer backend selected");
        Self { backend }
    }

    pub fn decode(&self, bytes: &[u8], charset_hint: Option<&str>) -> DecodeResult {
        smart_decode(bytes, charset_hint)
    }

    pub fn normalize(&self, text: &str) -> String {
        normalize_korean_text(text)
    }

    pub fn tokenize(&self, text: &str) -> Vec<Morpheme> {
        self.backend.tokenize(text)
    }

    pub fn extract_nouns(&self, text: &str) -> Vec<String> {
        extract_nouns(&self.tokenize(text))
    }

    pub fn segment_sentences(&self, text: &str) -> Vec<String> {
        segment_sentences(text)
    }

    pub fn extract_keywords(&self, text: &str, top_k: usize) -> Vec<(String, f64)> {
        extract_keywords(&self.tokenize(text), top_k)
    }

    pub fn analyze_formality(&self, text: &str) -> (Formality, FormalityCounts) {
        analyze_formality(&self.segment_sentences(text))
    }

    pub fn analyze_reading_difficulty(&self, text: &str) -> ReadingDifficulty {
        let sentences = self.segment_sentences(text);
        let morphemes_per_sentence: Vec<Vec<Morpheme>> =
            sentences.iter().map(|s| self.tokenize(s)).collect();
        analyze_reading_difficulty(text, &sentences, &morphemes_per_sentence)
    }

    pub fn hanja_to_hangul(&self, text: &str) -> String {
        hanja_to_hangul(text)
    }

    pub fn extract_metadata(&self, text: &str) -> KoreanMetadata {
        extract_korean_metadata(text, self.backend.as_ref())
    }

    /// The full pipeline bytes-to-normalized-Markdown-fragment path used by
    /// `convert_korean_document`: decode with the encoding cascade, then
    /// normalize (NFC, zero-width/NBSP cleanup, mojibake repair, whitespace
    /// collapse, line-break repair).
    pub fn preprocess_document(&self, bytes: &[u8], charset_hint: Option<&str>) -> String {
        let decoded = self.decode(bytes, charset_hint);
        self.normalize(&decoded.text)
    }
}
