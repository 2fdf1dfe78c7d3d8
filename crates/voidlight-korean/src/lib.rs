//! Korean-aware text processing: encoding cascade, normalization,
//! tokenization with backend fallback, and derived linguistic analyses.

pub mod analysis;
pub mod charclass;
pub mod encoding;
pub mod hanja;
pub mod linebreak;
pub mod metadata;
pub mod mojibake;
pub mod morpheme;
pub mod normalize;
pub mod processor;

pub use analysis::{Formality, FormalityCounts, ReadingDifficulty};
pub use charclass::detect_korean_ratio;
pub use encoding::{smart_decode, DecodeResult};
pub use hanja::hanja_to_hangul;
pub use metadata::{extract_korean_metadata, KoreanMetadata};
pub use morpheme::{HeuristicBackend, Morpheme, TokenizerBackend};
pub use normalize::normalize_korean_text;
pub use processor::KoreanTextProcessor;
