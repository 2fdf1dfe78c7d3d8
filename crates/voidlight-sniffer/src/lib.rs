//! Refines a seed `StreamInfo` using magic-byte detection, charset
//! heuristics, and extension fallback, in that precedence order.

pub mod charset;
pub mod extension;
pub mod magic;

use voidlight_stream::StreamInfo;

const TEXT_LIKE_PREFIXES: &[&str] = &["text/", "application/json", "application/xml"];

fn is_text_like(mimetype: &str) -> bool {
    TEXT_LIKE_PREFIXES.iter().any(|p| mimetype.starts_with(p))
}

/// Given a head buffer (<= 8 KiB, per the dispatcher's read contract) and a
/// seed `StreamInfo`, produce a refined `StreamInfo`.
pub fn sniff(head: &[u8], seed: &StreamInfo) -> StreamInfo {
    let mut info = seed.clone();

    match &seed.mimetype {
        Some(declared) => {
            if let Some(incompatible) = magic::is_demonstrably_incompatible(head, declared) {
                tracing::warn!(
                    declared = %declared,
                    detected = %incompatible,
                    "magic bytes disagree with declared content-type, reclassifying"
                );
                info.mimetype = Some(incompatible.to_string());
            }
        }
        None => {
            if let Some(sniffed) = magic::sniff_magic(head) {
                info.mimetype = Some(sniffed.to_string());
            }
        }
    }

    if info.charset.is_none() {
        let is_text = info
            .mimetype
            .as_deref()
            .map(is_text_like)
            .unwrap_or(true); // no mimetype yet: treat as text-candidate for charset purposes
        if is_text
            && let Some((charset, confidence)) = charset::detect_charset(head)
                && confidence >= 0.5 {
                    info.charset = Some(charset);
                }
    }

    if info.mimetype.is_none()
        && let Some(ext) = &info.extension
            && let Some(mime) = extension::mimetype_for_extension(ext) {
                info.mimetype = Some(mime.to_string());
            }

    info
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn magic_bytes_set_mimetype_when_unset() {
        let seed = StreamInfo::new();
        let info = sniff(b"%PDF-1.4", &seed);
        assert_eq!(info.mimetype.as_deref(), Some("application/pdf"));
    }

    #[test]
    fn confident_upstream_declaration_is_not_downgraded() {
        let seed = StreamInfo::new().with_mimetype("application/pdf");
        let info = sniff(b"%PDF-1.4 but not really pdf bytes", &seed);
        assert_eq!(info.mimetype.as_deref(), Some("application/pdf"));
    }

    #[test]
    fn zip_signature_under_pdf_label_is_reclassified() {
        let seed = StreamInfo::new().with_mimetype("application/pdf");
        let info = sniff(b"PK\x03\x04rest", &seed);
        assert_eq!(info.mimetype.as_deref(), Some("application/zip"));
    }

    #[test]
    fn extension_fallback_applies_when_mimetype_still_unset() {
        let seed = StreamInfo::new().with_extension("csv");
        let info = sniff(b"name,age\nkim,30", &seed);
        assert_eq!(info.mimetype.as_deref(), Some("text/csv"));
    }

    #[test]
    fn charset_is_set_for_text_like_mimetypes_only() {
        let seed = StreamInfo::new().with_mimetype("text/plain");
        let info = sniff(b"Hello World", &seed);
        assert_eq!(info.charset.as_deref(), Some("utf-8"));
    }
}
