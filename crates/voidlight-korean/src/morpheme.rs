//! Morpheme record and the tokenizer backend fallback ladder.
//!
//! Tiers 1 (Kiwi-family) and 2 (Java-backed) require external runtimes
//! that are out of reach for a self-contained Rust binary; this crate
//! models the ladder as a trait so either could be wired in later, but
//! ships only the always-available tier 3 heuristic. Backend selection
//! happens once at processor construction and is logged, never retried
//! per-call.

use crate::charclass::{is_korean_char, is_latin_char};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Morpheme {
    pub surface: String,
    pub pos: String,
    pub lemma: String,
    pub start: usize,
    pub end: usize,
}

/// A pluggable morphological analyzer. All tiers emit the same `Morpheme`
/// record so downstream analyses never need to know which tier ran.
pub trait TokenizerBackend: Send + Sync {
    fn name(&self) -> &'static str;
    fn tokenize(&self, text: &str) -> Vec<Morpheme>;
}

/// Tier 3: always available. Whitespace-splits and tags each token by a
/// coarse character-class rule.
pub struct HeuristicBackend;

impl TokenizerBackend for HeuristicBackend {
    fn name(&self) -> &'static str {
        "heuristic"
    }

    fn tokenize(&self, text: &str) -> Vec<Morpheme> {
        let mut morphemes = Vec::new();
        let mut char_indices = text.char_indices().peekable();
        let mut token_start: Option<usize> = None;
        let mut token_chars: Vec<char> = Vec::new();

        let flush = |morphemes: &mut Vec<Morpheme>, start: usize, end: usize, chars: &[char]| {
            if chars.is_empty() {
                return;
            }
            let surface: String = chars.iter().collect();
            let pos = classify(&surface);
            morphemes.push(Morpheme {
                surface: surface.clone(),
                pos,
                lemma: surface,
                start,
                end,
            });
        };

        while let Some((idx, c)) = char_indices.next() {
            if c.is_whitespace() {
                if let Some(start) = token_start.take() {
                    flush(&mut morphemes, start, idx, &token_chars);
                    token_chars.clear();
                }
                continue;
            }
            if token_start.is_none() {
                token_start = Some(idx);
            }
            token_chars.push(c);
            let at_end = char_indices.peek().is_none();
            if at_end {
                let end = idx + c.len_utf8();
                let start = token_start.take().unwrap();
                flush(&mut morphemes, start, end, &token_chars);
                token_chars.clear();
            }
        }

        morphemes
    }
}

fn classify(token: &str) -> String {
    let all_hangul = token.chars().all(is_korean_char) && token.chars().any(is_korean_char);
    if all_hangul {
        return "NN".to_string();
    }
    if token.chars().all(|c| c.is_ascii_digit()) {
        return "NUM".to_string();
    }
    if token.chars().any(is_latin_char) {
        return "FW".to_string();
    }
    "UNK".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_whitespace_and_tags_by_character_class() {
        let backend = HeuristicBackend;
        let morphemes = backend.tokenize("안녕하세요 Hello 123");
        assert_eq!(morphemes.len(), 3);
        assert_eq!(morphemes[0].pos, "NN");
        assert_eq!(morphemes[1].pos, "FW");
        assert_eq!(morphemes[2].pos, "NUM");
    }

    #[test]
    fn offsets_point_back_into_the_source_string() {
        let backend = HeuristicBackend;
        let text = "안녕 하세요";
        let morphemes = backend.tokenize(text);
        assert_eq!(&text[morphemes[0].start..morphemes[0].end], "안녕");
        assert_eq!(&text[morphemes[1].start..morphemes[1].end], "하세요");
    }

    #[test]
    fn lemma_equals_surface_in_the_heuristic_tier() {
        let backend = HeuristicBackend;
        let morphemes = backend.tokenize("안녕");
        assert_eq!(morphemes[0].lemma, morphemes[0].surface);
    }
}
