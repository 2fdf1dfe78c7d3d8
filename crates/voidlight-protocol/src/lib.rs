//! MCP protocol types built on top of [`voidlight_json_rpc`], plus the
//! core error taxonomy shared by every subsystem (resolver, sniffer,
//! dispatcher, Korean processor, transport).

pub mod content;
pub mod initialize;
pub mod schema;
pub mod tools;
pub mod version;

pub use content::ToolResultContent;
pub use initialize::{
    ClientCapabilities, Implementation, InitializeRequest, InitializeResult, ServerCapabilities,
};
pub use schema::{JsonSchema, ToolSchema};
pub use tools::{CallToolRequest, CallToolResult, ListToolsResult, Tool};
pub use version::MCP_VERSION;

use voidlight_json_rpc::error::JsonRpcErrorObject;
use voidlight_json_rpc::ToJsonRpcError;

pub type McpResult<T> = Result<T, McpError>;

/// The error taxonomy described in the spec's error-handling design: every
/// error carries a `kind`, a message, and an optional cause.
#[derive(Debug, thiserror::Error)]
pub enum McpError {
    #[error("unsupported URI scheme: {0}")]
    UnsupportedUriScheme(String),

    #[error("failed to fetch URI: {0}")]
    UriFetchError(String),

    #[error("no converter accepted the stream ({0})")]
    UnsupportedFormatError(String),

    #[error("conversion failed: {0}")]
    FileConversionError(String),

    #[error("missing optional dependency: {0}")]
    MissingDependencyError(String),

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("cancelled: {0}")]
    Cancelled(String),
}

impl McpError {
    /// Stable diagnostic tag carried in `error.data.kind` on the wire.
    pub fn kind(&self) -> &'static str {
        match self {
            McpError::UnsupportedUriScheme(_) => "UnsupportedURIScheme",
            McpError::UriFetchError(_) => "URIFetchError",
            McpError::UnsupportedFormatError(_) => "UnsupportedFormatError",
            McpError::FileConversionError(_) => "FileConversionError",
            McpError::MissingDependencyError(_) => "MissingDependencyError",
            McpError::InvalidRequest(_) => "InvalidRequest",
            McpError::Cancelled(_) => "Cancelled",
        }
    }
}

impl ToJsonRpcError for McpError {
    fn to_error_object(&self) -> JsonRpcErrorObject {
        let data = serde_json::json!({ "kind": self.kind() });
        match self {
            McpError::InvalidRequest(msg) => JsonRpcErrorObject::invalid_params(msg),
            McpError::UnsupportedUriScheme(_)
            | McpError::UriFetchError(_)
            | McpError::UnsupportedFormatError(_)
            | McpError::FileConversionError(_)
            | McpError::MissingDependencyError(_)
            | McpError::Cancelled(_) => {
                JsonRpcErrorObject::server_error(-32010, &self.to_string(), Some(data))
            }
        }
    }
}
