//! `korean_char_ratio`, `has_korean`, `has_hanja`, `has_mixed_script`,
//! `char_count`, `word_count`, `sentence_count`, `top_nouns` — the
//! frontmatter-block payload for `convert_korean_document`.

use serde::Serialize;

use crate::analysis::{extract_keywords, segment_sentences};
use crate::charclass::{detect_korean_ratio, is_hanja_char, is_korean_char, is_latin_char};
use crate::morpheme::{Morpheme, TokenizerBackend};

#[derive(Debug, Clone, Serialize)]
pub struct KoreanMetadata {
    pub korean_char_ratio: f64,
    pub has_korean: bool,
    pub has_hanja: bool,
    pub has_mixed_script: bool,
    pub char_count: usize,
    pub word_count: usize,
    pub sentence_count: usize,
    pub top_nouns: Vec<String>,
}

pub fn extract_korean_metadata(text: &str, backend: &dyn TokenizerBackend) -> KoreanMetadata {
    let morphemes: Vec<Morpheme> = backend.tokenize(text);
    let sentences = segment_sentences(text);
    let keywords = extract_keywords(&morphemes, 10);

    let has_korean = text.chars().any(is_korean_char);
    let has_hanja = text.chars().any(is_hanja_char);
    let has_latin = text.chars().any(is_latin_char);
    let has_mixed_script = [has_korean, has_hanja, has_latin]
        .iter()
        .filter(|&&present| present)
        .count()
        >= 2;

    KoreanMetadata {
        korean_char_ratio: detect_korean_ratio(text),
        has_korean,
        has_hanja,
        has_mixed_script,
        char_count: text.chars().count(),
        word_count: morphemes.len(),
        sentence_count: sentences.len(),
        top_nouns: keywords.into_iter().map(|(term, _)| term).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::morpheme::HeuristicBackend;

    #[test]
    fn pure_korean_document_reports_no_mixed_script() {
        let metadata = extract_korean_metadata("안녕하세요. 반갑습니다.", &HeuristicBackend);
        assert!(metadata.has_korean);
        assert!(!metadata.has_hanja);
        assert!(!metadata.has_mixed_script);
        assert_eq!(metadata.sentence_count, 2);
    }

    #[test]
    fn mixed_korean_and_latin_is_flagged() {
        let metadata = extract_korean_metadata("Hello 안녕하세요", &HeuristicBackend);
        assert!(metadata.has_mixed_script);
    }

    #[test]
    fn ratio_matches_the_documented_formula() {
        let metadata = extract_korean_metadata("Hello 안녕", &HeuristicBackend);
        assert!((metadata.korean_char_ratio - 2.0 / 7.0).abs() < 1e-9);
    }
}
