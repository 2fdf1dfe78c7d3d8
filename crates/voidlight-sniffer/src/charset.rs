//! Confidence-scored charset detection over a head buffer, used only when
//! no charset was declared upstream.

/// Returns `(charset, confidence)` when confidence is high enough to act on.
/// The dispatcher only applies the result when confidence >= 0.5.
pub fn detect_charset(head: &[u8]) -> Option<(String, f32)> {
    if head.is_empty() {
        return None;
    }

    if head.starts_with(&[0xEF, 0xBB, 0xBF]) {
        return Some(("utf-8".to_string(), 1.0));
    }
    if head.starts_with(&[0xFF, 0xFE]) {
        return Some(("utf-16le".to_string(), 1.0));
    }
    if head.starts_with(&[0xFE, 0xFF]) {
        return Some(("utf-16be".to_string(), 1.0));
    }

    if let Ok(text) = std::str::from_utf8(head) {
        let confidence = utf8_confidence(text);
        if confidence >= 0.5 {
            return Some(("utf-8".to_string(), confidence));
        }
    }

    // Bytes in the CP949/EUC-KR lead-byte range, with no stray C0 control
    // bytes, are a reasonable (if weak) signal for a Korean 8-bit encoding.
    let high_byte_run = head.iter().filter(|&&b| (0xA1..=0xFE).contains(&b)).count();
    if !head.is_empty() && high_byte_run * 2 >= head.len() {
        return Some(("euc-kr".to_string(), 0.5));
    }

    None
}

fn utf8_confidence(text: &str) -> f32 {
    if text.is_empty() {
        return 0.0;
    }
    let control_count = text
        .chars()
        .filter(|c| c.is_control() && *c != '\n' && *c != '\r' && *c != '\t')
        .count();
    if control_count == 0 {
        1.0
    } else {
        (1.0 - (control_count as f32 / text.chars().count() as f32)).max(0.0)
    }
}
