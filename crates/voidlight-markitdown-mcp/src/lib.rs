//! The MCP server core: tool definitions, JSON-RPC handlers, and the
//! dispatcher wiring shared by both the STDIO and HTTP entry points.
//! Kept as a library so integration tests can drive it without
//! shelling out to the binary.

pub mod tools;

use std::sync::Arc;

use voidlight_json_rpc::JsonRpcDispatcher;
use voidlight_protocol::McpError;

use tools::{InitializeHandler, NoopHandler, ToolContext, ToolsCallHandler, ToolsListHandler};

pub fn build_dispatcher() -> Arc<JsonRpcDispatcher<McpError>> {
    let context = Arc::new(ToolContext::new());
    let mut dispatcher = JsonRpcDispatcher::new();
    dispatcher.register_method("initialize", InitializeHandler);
    dispatcher.register_method("tools/list", ToolsListHandler);
    dispatcher.register_method("tools/call", ToolsCallHandler::new(context));
    dispatcher.register_method("notifications/initialized", NoopHandler);
    dispatcher.register_method("shutdown", NoopHandler);
    Arc::new(dispatcher)
}
