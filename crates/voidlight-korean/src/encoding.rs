//! Encoding cascade: turns raw bytes, plus an optional charset hint, into a
//! decoded `String`. Tries a hint first, then a fixed order of candidate
//! encodings, and finally falls back to lossy UTF-8.

/// Outcome of [`smart_decode`]: the decoded text and which encoding won,
/// so callers (and logs) can tell a confident decode from the lossy escape
/// hatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeResult {
    pub text: String,
    pub encoding: &'static str,
    pub lossy: bool,
}

/// encoding_rs doesn't distinguish windows-949 (CP949) from its EUC-KR
/// encoding — the latter already extends KS X 1001 with the full Hangul
/// Syllables block to match Windows code page 949. Both hints resolve to
/// the same decoder.
fn encoding_for_hint(hint: &str) -> Option<&'static encoding_rs::Encoding> {
    match hint.to_lowercase().replace(['_', ' '], "-").as_str() {
        "utf-8" | "utf8" => Some(encoding_rs::UTF_8),
        "cp949" | "euc-kr" | "euckr" | "ms949" | "windows-949" => Some(encoding_rs::EUC_KR),
        "utf-16le" => Some(encoding_rs::UTF_16LE),
        "utf-16be" => Some(encoding_rs::UTF_16BE),
        _ => encoding_rs::Encoding::for_label(hint.as_bytes()),
    }
}

fn strict_decode(encoding: &'static encoding_rs::Encoding, bytes: &[u8]) -> Option<String> {
    encoding
        .decode_without_bom_handling_and_without_replacement(bytes)
        .map(|cow| cow.into_owned())
}

/// Order: hint (strict) -> UTF-8 -> UTF-8 w/ BOM -> CP949 -> EUC-KR ->
/// UTF-16 (LE/BE, only if BOM present) -> UTF-8 with replacement.
pub fn smart_decode(bytes: &[u8], charset_hint: Option<&str>) -> DecodeResult {
    if let Some(hint) = charset_hint
        && let Some(encoding) = encoding_for_hint(hint)
            && let Some(text) = strict_decode(encoding, bytes) {
                return DecodeResult {
                    text,
                    encoding: encoding.name(),
                    lossy: false,
                };
            }

    if bytes.starts_with(&[0xEF, 0xBB, 0xBF])
        && let Some(text) = strict_decode(encoding_rs::UTF_8, &bytes[3..]) {
            return DecodeResult {
                text,
                encoding: "UTF-8",
                lossy: false,
            };
        }

    if let Some(text) = strict_decode(encoding_rs::UTF_8, bytes) {
        return DecodeResult {
            text,
            encoding: "UTF-8",
            lossy: false,
        };
    }

    if let Some(text) = strict_decode(encoding_rs::EUC_KR, bytes) {
        return DecodeResult {
            text,
            encoding: "EUC-KR",
            lossy: false,
        };
    }

    if bytes.starts_with(&[0xFF, 0xFE])
        && let Some(text) = strict_decode(encoding_rs::UTF_16LE, &bytes[2..]) {
            return DecodeResult {
                text,
                encoding: "UTF-16LE",
                lossy: false,
            };
        }
    if bytes.starts_with(&[0xFE, 0xFF])
        && let Some(text) = strict_decode(encoding_rs::UTF_16BE, &bytes[2..]) {
            return DecodeResult {
                text,
                encoding: "UTF-16BE",
                lossy: false,
            };
        }

    let (text, _, had_errors) = encoding_rs::UTF_8.decode(bytes);
    if had_errors {
        tracing::warn!("all strict decodes failed, falling back to lossy UTF-8");
    }
    DecodeResult {
        text: text.into_owned(),
        encoding: "UTF-8",
        lossy: had_errors,
    }
}
