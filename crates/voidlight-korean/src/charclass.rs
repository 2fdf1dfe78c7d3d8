//! Character-class predicates: Hangul, Hanja, and the Korean-ratio metric.

/// Hangul syllable block, per the glossary: U+AC00-U+D7AF. Jamo (letters)
/// and compatibility Jamo also count as "Korean" for display purposes.
pub fn is_korean_char(c: char) -> bool {
    matches!(c,
        '\u{AC00}'..='\u{D7A3}' // Hangul syllables
        | '\u{1100}'..='\u{11FF}' // Hangul Jamo
        | '\u{3130}'..='\u{318F}' // Hangul compatibility Jamo
        | '\u{A960}'..='\u{A97F}' // Hangul Jamo extended-A
        | '\u{D7B0}'..='\u{D7FF}' // Hangul Jamo extended-B
    )
}

/// Only the syllable block counts for ratio/metadata purposes — Jamo alone
/// (e.g. a stray `ㄱ`) is Korean script but not a full syllable.
pub fn is_hangul_syllable(c: char) -> bool {
    matches!(c, '\u{AC00}'..='\u{D7A3}')
}

/// CJK Unified Ideographs, used in Korean text as Hanja.
pub fn is_hanja_char(c: char) -> bool {
    matches!(c,
        '\u{4E00}'..='\u{9FFF}'
        | '\u{3400}'..='\u{4DBF}'
        | '\u{F900}'..='\u{FAFF}'
    )
}

pub fn is_latin_char(c: char) -> bool {
    c.is_ascii_alphabetic()
}

/// r(s) = (count of Hangul syllables) / (total non-whitespace code points).
pub fn detect_korean_ratio(text: &str) -> f64 {
    let non_whitespace: Vec<char> = text.chars().filter(|c| !c.is_whitespace()).collect();
    if non_whitespace.is_empty() {
        return 0.0;
    }
    let korean = non_whitespace.iter().filter(|&&c| is_hangul_syllable(c)).count();
    korean as f64 / non_whitespace.len() as f64
}
