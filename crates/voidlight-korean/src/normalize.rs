//! The five-stage Korean normalization pipeline.

use unicode_normalization::UnicodeNormalization;

use crate::linebreak::fix_korean_line_breaks;
use crate::mojibake::repair_mojibake;

const ZERO_WIDTH: &[char] = &['\u{200B}', '\u{200C}', '\u{200D}', '\u{FEFF}'];

/// Runs NFC, zero-width/NBSP cleanup, mojibake repair, whitespace collapse,
/// and Korean line-break repair, in that order. Idempotent: re-running on
/// already-normalized text is a no-op.
pub fn normalize_korean_text(text: &str) -> String {
    let nfc: String = text.nfc().collect();
    let cleaned = remove_zero_width_and_nbsp(&nfc);
    let repaired = repair_mojibake(&cleaned);
    let space_collapsed = collapse_space_runs(&repaired);
    fix_korean_line_breaks(&space_collapsed)
}

fn remove_zero_width_and_nbsp(text: &str) -> String {
    text.chars()
        .filter(|c| !ZERO_WIDTH.contains(c))
        .map(|c| if c == '\u{00A0}' { ' ' } else { c })
        .collect()
}

/// Runs of >= 2 ordinary spaces collapse to one. Newlines are untouched
/// here — line-break repair owns newline-run collapsing.
fn collapse_space_runs(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut run = 0usize;
    for c in text.chars() {
        if c == ' ' {
            run += 1;
        } else {
            if run > 0 {
                out.push(' ');
            }
            run = 0;
            out.push(c);
        }
    }
    if run > 0 {
        out.push(' ');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapses_space_and_newline_runs() {
        let normalized = normalize_korean_text("안녕  하세요\n\n\n여러분");
        assert!(!normalized.contains("  "));
        assert!(!normalized.contains("\n\n\n"));
    }

    #[test]
    fn removes_zero_width_space() {
        let normalized = normalize_korean_text("안녕\u{200B}하세요");
        assert!(!normalized.contains('\u{200B}'));
    }

    #[test]
    fn repairs_known_mojibake() {
        let normalized = normalize_korean_text("안녕하세요 占쏙옙");
        assert!(!normalized.contains("占쏙옙"));
        assert!(normalized.contains('?'));
    }

    #[test]
    fn normalization_is_idempotent() {
        let once = normalize_korean_text("안녕  하세요\u{200B}\n\n\n\n반갑습니다");
        let twice = normalize_korean_text(&once);
        assert_eq!(once, twice);
    }
}
