//! The two MCP tools the server exposes, and the JSON-RPC handlers that
//! bind `initialize` / `tools/list` / `tools/call` to them.

use std::collections::HashMap;
use std::io::{Cursor, Read};
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};
use voidlight_dispatch::Dispatcher;
use voidlight_json_rpc::{JsonRpcHandler, RequestParams};
use voidlight_korean::KoreanTextProcessor;
use voidlight_protocol::{
    CallToolRequest, CallToolResult, Implementation, InitializeResult, JsonSchema, ListToolsResult,
    McpError, McpResult, Tool, ToolSchema,
};
use voidlight_stream::{SeekableBuffer, StreamInfo, DEFAULT_SPILL_THRESHOLD};

pub const SERVER_NAME: &str = "voidlight_markitdown";
pub const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");

fn tool_definitions() -> Vec<Tool> {
    vec![
        Tool {
            name: "convert_to_markdown".to_string(),
            description: Some("Converts the document at a URI to Markdown.".to_string()),
            input_schema: ToolSchema::object()
                .with_properties(HashMap::from([(
                    "uri".to_string(),
                    JsonSchema::string_with_description("The data:, file:, or http(s): URI to convert"),
                )]))
                .with_required(vec!["uri".to_string()]),
        },
        Tool {
            name: "convert_korean_document".to_string(),
            description: Some(
                "Converts the document at a URI to Markdown with Korean-aware decoding, \
                 line-break repair, and a metadata frontmatter block."
                    .to_string(),
            ),
            input_schema: ToolSchema::object()
                .with_properties(HashMap::from([
                    (
                        "uri".to_string(),
                        JsonSchema::string_with_description("The data:, file:, or http(s): URI to convert"),
                    ),
                    (
                        "normalize_korean".to_string(),
                        JsonSchema::boolean_with_default(
                            "Apply Korean normalization (NFC, mojibake repair, line-break repair) to the result",
                            true,
                        ),
                    ),
                ]))
                .with_required(vec!["uri".to_string()]),
        },
    ]
}

/// Shared, read-only core wired into every `tools/call`. Built once at
/// startup; the Korean processor in particular is expensive to probe for
/// backend availability and must not be reconstructed per request.
pub struct ToolContext {
    dispatcher: Dispatcher,
    korean: KoreanTextProcessor,
}

impl Default for ToolContext {
    fn default() -> Self {
        Self::new()
    }
}

impl ToolContext {
    pub fn new() -> Self {
        Self {
            dispatcher: Dispatcher::new(),
            korean: KoreanTextProcessor::new(),
        }
    }

    pub async fn convert_to_markdown(&self, uri: &str) -> McpResult<String> {
        let mut resolved = voidlight_resolver::resolve(uri).await?;
        let result = self.dispatcher.dispatch(&mut resolved.buffer, &resolved.info)?;
        Ok(result.markdown)
    }

    pub async fn convert_korean_document(&self, uri: &str, normalize_korean: bool) -> McpResult<String> {
        let resolved = voidlight_resolver::resolve(uri).await?;
        let mut buffer = resolved.buffer;
        let mut raw = Vec::new();
        buffer
            .read_to_end(&mut raw)
            .map_err(|e| McpError::FileConversionError(e.to_string()))?;

        let decoded = self.korean.decode(&raw, resolved.info.charset.as_deref());
        let reencoded = SeekableBuffer::from_reader(
            Cursor::new(decoded.text.clone().into_bytes()),
            DEFAULT_SPILL_THRESHOLD,
        )
        .map_err(|e| McpError::FileConversionError(e.to_string()))?;

        let reencoded_info = StreamInfo {
            charset: Some("utf-8".to_string()),
            ..resolved.info.clone()
        };

        let mut reencoded = reencoded;
        let result = self.dispatcher.dispatch(&mut reencoded, &reencoded_info)?;

        let mut markdown = result.markdown;
        if normalize_korean {
            markdown = self.korean.normalize(&markdown);
        }

        let metadata = self.korean.extract_metadata(&markdown);
        Ok(format!("{}\n\n{}", render_frontmatter(&metadata), markdown))
    }
}

fn render_frontmatter(metadata: &voidlight_korean::KoreanMetadata) -> String {
    let top_nouns = metadata
        .top_nouns
        .iter()
        .map(|n| format!("{n:?}"))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "---\nkorean_char_ratio: {:.4}\nhas_korean: {}\nhas_hanja: {}\nhas_mixed_script: {}\nchar_count: {}\nword_count: {}\nsentence_count: {}\ntop_nouns: [{}]\n---",
        metadata.korean_char_ratio,
        metadata.has_korean,
        metadata.has_hanja,
        metadata.has_mixed_script,
        metadata.char_count,
        metadata.word_count,
        metadata.sentence_count,
        top_nouns,
    )
}

pub struct InitializeHandler;

#[async_trait]
impl JsonRpcHandler for InitializeHandler {
    type Error = McpError;

    async fn handle(&self, _method: &str, _params: Option<RequestParams>) -> Result<Value, Self::Error> {
        let result = InitializeResult::new(Implementation::new(SERVER_NAME, SERVER_VERSION));
        Ok(serde_json::to_value(result).expect("InitializeResult always serializes"))
    }
}

pub struct ToolsListHandler;

#[async_trait]
impl JsonRpcHandler for ToolsListHandler {
    type Error = McpError;

    async fn handle(&self, _method: &str, _params: Option<RequestParams>) -> Result<Value, Self::Error> {
        let result = ListToolsResult { tools: tool_definitions() };
        Ok(serde_json::to_value(result).expect("ListToolsResult always serializes"))
    }
}

pub struct ToolsCallHandler {
    context: Arc<ToolContext>,
}

impl ToolsCallHandler {
    pub fn new(context: Arc<ToolContext>) -> Self {
        Self { context }
    }
}

#[async_trait]
impl JsonRpcHandler for ToolsCallHandler {
    type Error = McpError;

    async fn handle(&self, _method: &str, params: Option<RequestParams>) -> Result<Value, Self::Error> {
        let params = params.ok_or_else(|| McpError::InvalidRequest("tools/call requires params".into()))?;
        let value = match params {
            RequestParams::Object(map) => Value::Object(map.into_iter().collect()),
            RequestParams::Array(_) => {
                return Err(McpError::InvalidRequest("tools/call requires named params".into()))
            }
        };
        let request: CallToolRequest = serde_json::from_value(value)
            .map_err(|e| McpError::InvalidRequest(format!("malformed tools/call params: {e}")))?;

        let uri = request
            .arguments
            .get("uri")
            .and_then(Value::as_str)
            .ok_or_else(|| McpError::InvalidRequest("missing required parameter: uri".into()))?;

        let markdown = match request.name.as_str() {
            "convert_to_markdown" => self.context.convert_to_markdown(uri).await?,
            "convert_korean_document" => {
                let normalize_korean = request
                    .arguments
                    .get("normalize_korean")
                    .and_then(Value::as_bool)
                    .unwrap_or(true);
                self.context.convert_korean_document(uri, normalize_korean).await?
            }
            other => return Err(McpError::InvalidRequest(format!("unknown tool: {other}"))),
        };

        let result = CallToolResult::text(markdown);
        Ok(serde_json::to_value(result).expect("CallToolResult always serializes"))
    }
}

/// Notifications the client may send that carry no response and require
/// no action beyond acknowledgement (e.g. `notifications/initialized`).
pub struct NoopHandler;

#[async_trait]
impl JsonRpcHandler for NoopHandler {
    type Error = McpError;

    async fn handle(&self, _method: &str, _params: Option<RequestParams>) -> Result<Value, Self::Error> {
        Ok(json!(null))
    }
}
