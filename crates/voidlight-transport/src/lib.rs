//! MCP transport: line-delimited JSON-RPC over STDIO, and HTTP with the
//! Streamable-HTTP and legacy-SSE overlays.

pub mod framing;
pub mod http;
pub mod stdio;

pub use http::{serve_connection, HttpTransport, DEFAULT_BIND_ADDR};
pub use stdio::run_stdio;
