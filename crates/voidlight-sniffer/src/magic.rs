//! Magic-byte signature table for container/binary formats.

/// Matches leading bytes against known signatures, returning a MIME type.
/// Order matters only where one signature is a prefix of another; none are
/// here, so a simple linear scan suffices.
pub fn sniff_magic(head: &[u8]) -> Option<&'static str> {
    const SIGNATURES: &[(&[u8], &str)] = &[
        (b"%PDF-", "application/pdf"),
        (b"PK\x03\x04", "application/zip"),
        (b"PK\x05\x06", "application/zip"),
        (b"PK\x07\x08", "application/zip"),
        (
            b"\xd0\xcf\x11\xe0\xa1\xb1\x1a\xe1",
            "application/x-ole-storage",
        ),
        (b"\x89PNG\r\n\x1a\n", "image/png"),
        (b"\xff\xd8\xff", "image/jpeg"),
        (b"OggS", "application/ogg"),
        (b"\x1a\x45\xdf\xa3", "video/webm"),
        (b"RIFF", "application/x-riff"),
    ];

    SIGNATURES
        .iter()
        .find(|(sig, _)| head.starts_with(sig))
        .map(|(_, mime)| *mime)
}

/// Whether `head` under `declared` mimetype is demonstrably incompatible —
/// the one case where the sniffer is allowed to override a confident
/// upstream Content-Type: a ZIP signature found under a PDF label.
pub fn is_demonstrably_incompatible(head: &[u8], declared: &str) -> Option<&'static str> {
    if declared == "application/pdf" && (head.starts_with(b"PK\x03\x04") || head.starts_with(b"PK\x05\x06")) {
        return Some("application/zip");
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_pdf_signature() {
        assert_eq!(sniff_magic(b"%PDF-1.7\nmore"), Some("application/pdf"));
    }

    #[test]
    fn recognizes_zip_signature() {
        assert_eq!(sniff_magic(b"PK\x03\x04rest"), Some("application/zip"));
    }

    #[test]
    fn unknown_bytes_sniff_to_none() {
        assert_eq!(sniff_magic(b"just some text"), None);
    }

    #[test]
    fn zip_under_pdf_label_is_incompatible() {
        let head = b"PK\x03\x04rest";
        assert_eq!(
            is_demonstrably_incompatible(head, "application/pdf"),
            Some("application/zip")
        );
    }

    #[test]
    fn pdf_under_pdf_label_is_compatible() {
        let head = b"%PDF-1.7";
        assert_eq!(is_demonstrably_incompatible(head, "application/pdf"), None);
    }
}
