//! End-to-end coverage of the six concrete conversion and protocol
//! scenarios the server is built to satisfy.

use std::collections::HashMap;
use std::io::Write;

use serde_json::{json, Value};
use voidlight_json_rpc::{JsonRpcMessage, JsonRpcRequest, RequestId, RequestParams};
use voidlight_markitdown_mcp::build_dispatcher;
use voidlight_session::SessionStore;
use voidlight_transport::HttpTransport;

fn call_tool(name: &str, arguments: Value) -> RequestParams {
    let mut map = HashMap::new();
    map.insert("name".to_string(), json!(name));
    map.insert("arguments".to_string(), arguments);
    RequestParams::Object(map)
}

fn result_text(message: JsonRpcMessage) -> String {
    match message {
        JsonRpcMessage::Response(response) => {
            let result: Value = match response.result {
                voidlight_json_rpc::ResponseResult::Success(v) => v,
                voidlight_json_rpc::ResponseResult::Null => Value::Null,
            };
            result["content"][0]["text"].as_str().unwrap().to_string()
        }
        JsonRpcMessage::Error(err) => panic!("expected success, got error: {err:?}"),
    }
}

#[tokio::test]
async fn scenario_1_plain_text_data_uri() {
    let dispatcher = build_dispatcher();
    let request = JsonRpcRequest::new(
        RequestId::Number(1),
        "tools/call".to_string(),
        Some(call_tool(
            "convert_to_markdown",
            json!({"uri": "data:text/plain;charset=utf-8,Hello%20World"}),
        )),
    );
    let response = dispatcher.handle_request(request, true).await;
    assert_eq!(result_text(response), "Hello World");
}

#[tokio::test]
async fn scenario_2_html_data_uri_becomes_markdown() {
    let dispatcher = build_dispatcher();
    let request = JsonRpcRequest::new(
        RequestId::Number(2),
        "tools/call".to_string(),
        Some(call_tool(
            "convert_to_markdown",
            json!({"uri": "data:text/html,<h1>Title</h1><p>Body</p>"}),
        )),
    );
    let response = dispatcher.handle_request(request, true).await;
    let text = result_text(response);
    assert!(text.contains("# Title"));
    assert!(text.contains("Body"));
}

#[tokio::test]
async fn scenario_3_korean_cp949_document() {
    let dispatcher = build_dispatcher();
    let (bytes, _, _) = encoding_rs::EUC_KR.encode("안녕하세요.\n반갑습니다.");
    let uri = format!(
        "data:text/plain;charset=cp949;base64,{}",
        base64_encode(&bytes)
    );
    let request = JsonRpcRequest::new(
        RequestId::Number(3),
        "tools/call".to_string(),
        Some(call_tool(
            "convert_korean_document",
            json!({"uri": uri, "normalize_korean": true}),
        )),
    );
    let response = dispatcher.handle_request(request, true).await;
    let text = result_text(response);
    assert!(text.contains("안녕하세요"));
    assert!(text.contains("반갑습니다"));
    assert!(!text.contains('\u{FFFD}'));

    let body = text.split("---\n\n").last().unwrap();
    let between = body
        .find("안녕하세요")
        .and_then(|start| body[start..].find("반갑습니다").map(|end| &body[start + "안녕하세요".len()..start + end]));
    let between = between.unwrap();
    assert!(between == "\n" || between == " " || between.trim_start_matches('.') == "\n" || between.trim_start_matches('.') == " ");
}

#[tokio::test]
async fn scenario_4_csv_file_becomes_markdown_table() {
    let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
    writeln!(file, "name,age").unwrap();
    writeln!(file, "김철수,30").unwrap();
    writeln!(file, "이영희,25").unwrap();
    file.flush().unwrap();

    let uri = format!("file://{}", file.path().display());
    let dispatcher = build_dispatcher();
    let request = JsonRpcRequest::new(
        RequestId::Number(4),
        "tools/call".to_string(),
        Some(call_tool("convert_to_markdown", json!({"uri": uri}))),
    );
    let response = dispatcher.handle_request(request, true).await;
    let text = result_text(response);
    assert!(text.contains('|'));
    assert!(text.contains("김철수"));
    assert!(text.contains("이영희"));
}

#[tokio::test]
async fn scenario_5_unknown_method_is_method_not_found() {
    let dispatcher = build_dispatcher();
    let request = JsonRpcRequest::new(RequestId::Number(5), "foo/bar".to_string(), None);
    let response = dispatcher.handle_request(request, true).await;
    match response {
        JsonRpcMessage::Error(err) => assert_eq!(err.error.code, -32601),
        other => panic!("expected an error, got {other:?}"),
    }
}

#[tokio::test]
async fn scenario_6_concurrent_http_tool_calls_do_not_interleave() {
    let dispatcher = build_dispatcher();
    let transport = HttpTransport::new(dispatcher, SessionStore::default());
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        loop {
            let (stream, _) = listener.accept().await.unwrap();
            let transport = transport.clone();
            tokio::spawn(voidlight_transport::serve_connection(stream, transport));
        }
    });
    tokio::time::sleep(std::time::Duration::from_millis(50)).await;

    let client = reqwest::Client::new();
    let url = format!("http://{addr}/mcp");

    let req_a = client.post(&url).body(
        json!({
            "jsonrpc": "2.0",
            "id": 100,
            "method": "tools/call",
            "params": {"name": "convert_to_markdown", "arguments": {"uri": "data:text/plain,AAA"}},
        })
        .to_string(),
    );
    let req_b = client.post(&url).body(
        json!({
            "jsonrpc": "2.0",
            "id": 200,
            "method": "tools/call",
            "params": {"name": "convert_to_markdown", "arguments": {"uri": "data:text/plain,BBB"}},
        })
        .to_string(),
    );

    let (resp_a, resp_b) = tokio::join!(req_a.send(), req_b.send());
    let body_a = resp_a.unwrap().text().await.unwrap();
    let body_b = resp_b.unwrap().text().await.unwrap();

    assert!(body_a.contains("\"id\":100"));
    assert!(body_a.contains("AAA"));
    assert!(!body_a.contains("BBB"));
    assert!(body_b.contains("\"id\":200"));
    assert!(body_b.contains("BBB"));
    assert!(!body_b.contains("AAA"));
}

fn base64_encode(bytes: &[u8]) -> String {
    use base64::Engine;
    base64::engine::general_purpose::STANDARD.encode(bytes)
}
