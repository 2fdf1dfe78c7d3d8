//! Pure, transport-agnostic JSON-RPC 2.0 types and dispatch.
//!
//! Carries no MCP- or document-conversion-specific knowledge; the protocol
//! and transport crates build on top of this.

pub mod dispatch;
pub mod error;
pub mod notification;
pub mod prelude;
pub mod request;
pub mod response;
pub mod types;

pub use dispatch::{JsonRpcDispatcher, JsonRpcHandler, ToJsonRpcError};
pub use error::{JsonRpcError, JsonRpcErrorCode, JsonRpcErrorObject};
pub use notification::JsonRpcNotification;
pub use request::{JsonRpcRequest, RequestParams};
pub use response::{JsonRpcMessage, JsonRpcResponse, ResponseResult};
pub use types::{JsonRpcVersion, RequestId};

pub const JSONRPC_VERSION: &str = "2.0";
