//! Lookup table mapping known mojibake byte-sequences (CP949 bytes
//! misread as a Latin codepage, then re-encoded to UTF-8) to a
//! best-guess replacement.

use once_cell::sync::Lazy;
use std::collections::HashMap;

static MOJIBAKE_TABLE: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("占쏙옙", "?"),
        ("占쏙옙占쏙옙", "??"),
        ("占쎈쐄", "?"),
        ("繫가", "?"),
        ("\u{FFFD}\u{FFFD}\u{FFFD}", "?"),
    ])
});

/// Replaces every known mojibake pattern with its table entry. Patterns
/// not in the table are left untouched — this is a targeted repair, not
/// a general mojibake detector.
pub fn repair_mojibake(text: &str) -> String {
    let mut result = text.to_string();
    for (pattern, replacement) in MOJIBAKE_TABLE.iter() {
        if result.contains(pattern) {
            result = result.replace(pattern, replacement);
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_mojibake_pattern_is_replaced() {
        let text = "안녕하세요 占쏙옙";
        let repaired = repair_mojibake(text);
        assert!(!repaired.contains("占쏙옙"));
        assert!(repaired.contains('?'));
    }

    #[test]
    fn clean_text_is_unchanged() {
        let text = "안녕하세요";
        assert_eq!(repair_mojibake(text), text);
    }
}
