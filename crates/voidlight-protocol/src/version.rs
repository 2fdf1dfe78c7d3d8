//! MCP protocol version. The core speaks exactly one version; a richer
//! enum (as used by frameworks that must stay compatible across protocol
//! revisions) isn't needed here.

/// Protocol version string reported on `initialize`.
pub const MCP_VERSION: &str = "2025-06-18";
