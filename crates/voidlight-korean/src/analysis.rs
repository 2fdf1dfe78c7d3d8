//! Pure functions of the morpheme stream: noun extraction, sentence
//! segmentation, keyword extraction, formality, and reading difficulty.

use std::collections::HashMap;

use crate::charclass::is_hanja_char;
use crate::morpheme::Morpheme;

pub fn extract_nouns(morphemes: &[Morpheme]) -> Vec<String> {
    morphemes
        .iter()
        .filter(|m| m.pos.starts_with('N'))
        .map(|m| m.surface.clone())
        .collect()
}

const TERMINATORS: &[char] = &['.', '?', '!', '。', '？', '！'];
const BRACKET_OPENERS: &[char] = &['(', '「', '『', '〈', '《'];
const BRACKET_CLOSERS: &[char] = &[')', '」', '』', '〉', '》'];

/// Splits on sentence terminators while keeping quote/bracket-balanced
/// regions intact, and collapsing `...` to a single terminator.
///
/// Straight quotes (`"`, `'`) don't nest like brackets do, so each is
/// tracked as an open/closed toggle rather than a depth counter — a
/// bracket-style counter never decrements for them and a stray quote
/// anywhere in the document would suppress every later split.
pub fn segment_sentences(text: &str) -> Vec<String> {
    let collapsed = collapse_ellipses(text);
    let mut sentences = Vec::new();
    let mut current = String::new();
    let mut depth: i32 = 0;
    let mut in_double_quote = false;
    let mut in_single_quote = false;

    for c in collapsed.chars() {
        current.push(c);
        if c == '"' {
            in_double_quote = !in_double_quote;
        } else if c == '\'' {
            in_single_quote = !in_single_quote;
        } else if BRACKET_OPENERS.contains(&c) {
            depth += 1;
        } else if BRACKET_CLOSERS.contains(&c) {
            depth = (depth - 1).max(0);
        } else if TERMINATORS.contains(&c) && depth == 0 && !in_double_quote && !in_single_quote {
            sentences.push(current.trim().to_string());
            current.clear();
        }
    }
    if !current.trim().is_empty() {
        sentences.push(current.trim().to_string());
    }

    sentences.into_iter().filter(|s| !s.is_empty()).collect()
}

fn collapse_ellipses(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut dot_run = 0;
    for c in text.chars() {
        if c == '.' {
            dot_run += 1;
        } else {
            push_dot_run(&mut out, dot_run);
            dot_run = 0;
            out.push(c);
        }
    }
    push_dot_run(&mut out, dot_run);
    out
}

fn push_dot_run(out: &mut String, run: usize) {
    if run == 0 {
        return;
    }
    out.push('.');
}

/// Frequency of nouns (length >= 2), normalized by log-document-length,
/// top-K by descending score.
pub fn extract_keywords(morphemes: &[Morpheme], top_k: usize) -> Vec<(String, f64)> {
    let nouns: Vec<&str> = morphemes
        .iter()
        .filter(|m| m.pos.starts_with('N') && m.surface.chars().count() >= 2)
        .map(|m| m.surface.as_str())
        .collect();

    if nouns.is_empty() {
        return Vec::new();
    }

    let mut counts: HashMap<&str, usize> = HashMap::new();
    for noun in &nouns {
        *counts.entry(noun).or_insert(0) += 1;
    }

    let doc_len = nouns.len() as f64;
    let log_len = (doc_len + 1.0).ln().max(1.0);

    let mut scored: Vec<(String, f64)> = counts
        .into_iter()
        .map(|(term, count)| (term.to_string(), count as f64 / log_len))
        .collect();

    scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap().then_with(|| a.0.cmp(&b.0)));
    scored.truncate(top_k);
    scored
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Formality {
    Formal,
    Polite,
    Informal,
}

#[derive(Debug, Clone, Default)]
pub struct FormalityCounts {
    pub formal: usize,
    pub polite: usize,
    pub informal: usize,
    pub honorific: usize,
}

const FORMAL_ENDINGS: &[&str] = &["니다"];
const POLITE_ENDINGS: &[&str] = &["요", "에요", "예요"];
const INFORMAL_ENDINGS: &[&str] = &["다", "야", "어", "아"];
const HONORIFIC_MARKERS: &[&str] = &["시", "님"];

pub fn analyze_formality(sentences: &[String]) -> (Formality, FormalityCounts) {
    let mut counts = FormalityCounts::default();

    for sentence in sentences {
        let trimmed = sentence.trim_end_matches(|c: char| TERMINATORS.contains(&c));
        if FORMAL_ENDINGS.iter().any(|e| trimmed.ends_with(e)) {
            counts.formal += 1;
        } else if POLITE_ENDINGS.iter().any(|e| trimmed.ends_with(e)) {
            counts.polite += 1;
        } else if INFORMAL_ENDINGS.iter().any(|e| trimmed.ends_with(e)) {
            counts.informal += 1;
        }
        if HONORIFIC_MARKERS.iter().any(|m| sentence.contains(m)) {
            counts.honorific += 1;
        }
    }

    let formality = if counts.formal >= counts.polite && counts.formal >= counts.informal {
        Formality::Formal
    } else if counts.polite >= counts.informal {
        Formality::Polite
    } else {
        Formality::Informal
    };

    (formality, counts)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadingDifficulty {
    Beginner,
    Intermediate,
    Advanced,
}

pub fn analyze_reading_difficulty(
    text: &str,
    sentences: &[String],
    morphemes_per_sentence: &[Vec<Morpheme>],
) -> ReadingDifficulty {
    let total_morphemes: usize = morphemes_per_sentence.iter().map(Vec::len).sum();
    let avg_sentence_len = if sentences.is_empty() {
        0.0
    } else {
        total_morphemes as f64 / sentences.len() as f64
    };

    let complex_words = morphemes_per_sentence
        .iter()
        .flatten()
        .filter(|m| m.surface.chars().count() >= 4 || m.surface.chars().any(is_hanja_char))
        .count();
    let complex_ratio = if total_morphemes == 0 {
        0.0
    } else {
        complex_words as f64 / total_morphemes as f64
    };

    let hanja_count = text.chars().filter(|&c| is_hanja_char(c)).count();
    let char_count = text.chars().count().max(1);
    let hanja_ratio = hanja_count as f64 / char_count as f64;

    if avg_sentence_len >= 15.0 || complex_ratio >= 0.3 || hanja_ratio >= 0.1 {
        ReadingDifficulty::Advanced
    } else if avg_sentence_len >= 8.0 || complex_ratio >= 0.15 {
        ReadingDifficulty::Intermediate
    } else {
        ReadingDifficulty::Beginner
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::morpheme::{HeuristicBackend, TokenizerBackend};

    #[test]
    fn extracts_nouns_by_pos_prefix() {
        let morphemes = HeuristicBackend.tokenize("오늘 날씨가 좋습니다");
        let nouns = extract_nouns(&morphemes);
        assert!(nouns.contains(&"오늘".to_string()));
    }

    #[test]
    fn segments_on_terminators_and_keeps_quote_balance() {
        let sentences =
            segment_sentences("안녕하세요. 반갑습니다! 오늘 날씨는 어떤가요? 좋은 하루 되세요.");
        assert!(sentences.len() >= 3);
        assert!(sentences.iter().any(|s| s.contains("안녕하세요")));
        assert!(sentences.iter().any(|s| s.contains("반갑습니다")));
    }

    #[test]
    fn a_straight_quote_does_not_suppress_later_splits() {
        let sentences =
            segment_sentences("그는 \"안녕하세요.\"라고 말했다. 그리고 돌아갔다. 끝이었다.");
        assert_eq!(sentences.len(), 3);
    }

    #[test]
    fn collapses_ellipsis_to_a_single_terminator() {
        let sentences = segment_sentences("잠깐만요... 생각 좀 해볼게요.");
        assert_eq!(sentences.len(), 2);
    }

    #[test]
    fn keyword_extraction_favors_frequent_nouns() {
        let morphemes =
            HeuristicBackend.tokenize("인공지능 기술 발전 인공지능 생활 변화 인공지능");
        let keywords = extract_keywords(&morphemes, 5);
        assert_eq!(keywords[0].0, "인공지능");
    }

    #[test]
    fn formal_endings_are_classified_as_formal() {
        let sentences = vec!["감사합니다.".to_string(), "환영합니다.".to_string()];
        let (formality, counts) = analyze_formality(&sentences);
        assert_eq!(formality, Formality::Formal);
        assert!(counts.formal >= 1);
    }
}
