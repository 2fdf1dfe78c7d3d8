//! Stream descriptors and seekable-buffering primitives shared by the URI
//! resolver, content sniffer, and converter dispatcher.

pub mod buffer;
pub mod info;
pub mod result;

pub use buffer::{SeekableBuffer, DEFAULT_SPILL_THRESHOLD};
pub use info::StreamInfo;
pub use result::ConverterResult;
