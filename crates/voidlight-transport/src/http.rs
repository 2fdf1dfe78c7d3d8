//! HTTP transport: `POST /mcp` (Streamable HTTP), `GET /sse` + `POST
//! /messages/` (legacy SSE pair). Thin by design — no auth, rate
//! limiting, or CORS beyond permissive loopback defaults.

use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;

use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper::body::Incoming;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Method, Request, Response, StatusCode};
use hyper_util::rt::TokioIo;
use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;
use tokio_stream::StreamExt;
use voidlight_json_rpc::{JsonRpcDispatcher, JsonRpcMessage};
use voidlight_protocol::McpError;
use voidlight_session::SessionStore;

use crate::framing::{parse_incoming, serialize_message, IncomingMessage};

pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3001";
pub const MAX_BODY_SIZE: usize = 100 * 1024 * 1024;
const SESSION_HEADER: &str = "mcp-session-id";

type BoxBody = http_body_util::combinators::UnsyncBoxBody<Bytes, hyper::Error>;

#[derive(Clone)]
pub struct HttpTransport {
    dispatcher: Arc<JsonRpcDispatcher<McpError>>,
    sessions: SessionStore,
    sse_senders: Arc<tokio::sync::RwLock<std::collections::HashMap<String, mpsc::Sender<String>>>>,
}

impl HttpTransport {
    pub fn new(dispatcher: Arc<JsonRpcDispatcher<McpError>>, sessions: SessionStore) -> Self {
        Self {
            dispatcher,
            sessions,
            sse_senders: Arc::new(tokio::sync::RwLock::new(std::collections::HashMap::new())),
        }
    }

    pub async fn run(self, addr: SocketAddr) -> std::io::Result<()> {
        let listener = TcpListener::bind(addr).await?;
        tracing::info!(%addr, "MCP HTTP transport listening");
        self.clone().sessions.spawn_sweeper();

        loop {
            let (stream, peer) = listener.accept().await?;
            tracing::debug!(%peer, "accepted connection");
            tokio::spawn(serve_connection(stream, self.clone()));
        }
    }
}

/// Drives a single accepted TCP connection to completion. Exposed so
/// callers that manage their own `TcpListener` (tests, embedders) can
/// reuse the same HTTP/1 service wiring `run` uses internally.
pub async fn serve_connection(stream: tokio::net::TcpStream, transport: HttpTransport) {
    let io = TokioIo::new(stream);
    let service = service_fn(move |req| handle(req, transport.clone()));
    if let Err(err) = http1::Builder::new().serve_connection(io, service).await {
        tracing::debug!(%err, "connection error");
    }
}

async fn handle(
    req: Request<Incoming>,
    transport: HttpTransport,
) -> Result<Response<BoxBody>, Infallible> {
    let path = req.uri().path().to_string();
    let method = req.method().clone();

    let response = match (method.clone(), path.as_str()) {
        (Method::POST, "/mcp") => handle_mcp(req, &transport).await,
        (Method::GET, "/sse") => handle_sse_open(&transport).await,
        (Method::POST, "/messages/") | (Method::POST, "/messages") => {
            handle_sse_post(req, &transport).await
        }
        _ => not_found(),
    };

    Ok(response)
}

/// Stateless by default: `Mcp-Session-Id` is optional on `initialize` and,
/// if supplied, echoed back on the response for subsequent correlation.
async fn handle_mcp(req: Request<Incoming>, transport: &HttpTransport) -> Response<BoxBody> {
    let session_header = req
        .headers()
        .get(SESSION_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    let body = match read_body(req).await {
        Ok(bytes) => bytes,
        Err(status) => return status_response(status, "body too large"),
    };
    let text = String::from_utf8_lossy(&body).into_owned();

    let initialized = match &session_header {
        Some(id) => transport.sessions.get(id).await.is_some(),
        None => true,
    };

    let (message, is_initialize) = match parse_incoming(&text) {
        Ok(IncomingMessage::Request(request)) => {
            let is_initialize = request.method == "initialize";
            let response = transport.dispatcher.handle_request(request, initialized).await;
            (response, is_initialize)
        }
        Ok(IncomingMessage::Notification(notification)) => {
            transport.dispatcher.handle_notification(notification).await;
            return Response::builder()
                .status(StatusCode::ACCEPTED)
                .body(empty_body())
                .unwrap();
        }
        Err(parse_error) => (JsonRpcMessage::Error(parse_error), false),
    };

    let mut builder = Response::builder()
        .status(StatusCode::OK)
        .header("content-type", "application/json");

    if is_initialize && matches!(message, JsonRpcMessage::Response(_)) {
        let session = transport.sessions.create("2025-06-18".to_string(), None).await;
        builder = builder.header(SESSION_HEADER, session.session_id);
    } else if let Some(id) = &session_header {
        transport.sessions.touch(id).await;
    }

    let json = serialize_message(&message);
    builder.body(full_body(json)).unwrap()
}

/// Opens a long-lived `text/event-stream` and immediately emits a
/// `session` event carrying the session id and the messages endpoint.
async fn handle_sse_open(transport: &HttpTransport) -> Response<BoxBody> {
    let session = transport.sessions.create("2025-06-18".to_string(), None).await;
    let (tx, rx) = mpsc::channel::<String>(32);

    transport
        .sse_senders
        .write()
        .await
        .insert(session.session_id.clone(), tx);

    let opening = format!(
        "event: session\ndata: {{\"sessionId\":\"{}\",\"endpoint\":\"/messages/\"}}\n\n",
        session.session_id
    );

    let stream = ReceiverStream::new(rx).map(|event| Ok::<_, hyper::Error>(Bytes::from(event)));
    let opening_stream = tokio_stream::once(Ok::<_, hyper::Error>(Bytes::from(opening)));
    let body = http_body_util::StreamBody::new(
        opening_stream
            .chain(stream)
            .map(|chunk| chunk.map(http_body::Frame::data)),
    );

    Response::builder()
        .status(StatusCode::OK)
        .header("content-type", "text/event-stream")
        .header("cache-control", "no-cache")
        .body(body.boxed_unsync())
        .unwrap()
}

/// Accepts a JSON-RPC request addressed to a session opened via `/sse`;
/// the response is delivered as an SSE event on that session's stream,
/// and this endpoint acknowledges with 202.
async fn handle_sse_post(req: Request<Incoming>, transport: &HttpTransport) -> Response<BoxBody> {
    let session_id = req
        .headers()
        .get(SESSION_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    let Some(session_id) = session_id else {
        return status_response(StatusCode::BAD_REQUEST, "missing Mcp-Session-Id header");
    };

    if transport.sessions.get(&session_id).await.is_none() {
        return status_response(StatusCode::NOT_FOUND, "unknown session");
    }

    let body = match read_body(req).await {
        Ok(bytes) => bytes,
        Err(status) => return status_response(status, "body too large"),
    };
    let text = String::from_utf8_lossy(&body).into_owned();

    match parse_incoming(&text) {
        Ok(IncomingMessage::Request(request)) => {
            // The session was already created by the GET /sse that opened
            // this stream, so every request arriving here is post-initialize.
            let response = transport.dispatcher.handle_request(request, true).await;
            transport.sessions.touch(&session_id).await;
            let senders = transport.sse_senders.read().await;
            if let Some(sender) = senders.get(&session_id) {
                let event = format!("event: message\ndata: {}\n\n", serialize_message(&response));
                let _ = sender.send(event).await;
            }
        }
        Ok(IncomingMessage::Notification(notification)) => {
            transport.dispatcher.handle_notification(notification).await;
        }
        Err(parse_error) => {
            let senders = transport.sse_senders.read().await;
            if let Some(sender) = senders.get(&session_id) {
                let event = format!(
                    "event: message\ndata: {}\n\n",
                    serialize_message(&JsonRpcMessage::Error(parse_error))
                );
                let _ = sender.send(event).await;
            }
        }
    }

    Response::builder()
        .status(StatusCode::ACCEPTED)
        .body(empty_body())
        .unwrap()
}

/// Reads the body frame by frame, rejecting as soon as the cumulative size
/// crosses `MAX_BODY_SIZE` instead of buffering an oversized request in
/// full before checking it.
async fn read_body(req: Request<Incoming>) -> Result<Vec<u8>, StatusCode> {
    if let Some(len) = req
        .headers()
        .get(hyper::header::CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<usize>().ok())
        && len > MAX_BODY_SIZE
    {
        return Err(StatusCode::PAYLOAD_TOO_LARGE);
    }

    let mut body = req.into_body();
    let mut collected = Vec::new();
    while let Some(frame) = body.frame().await {
        let frame = frame.map_err(|_| StatusCode::BAD_REQUEST)?;
        if let Some(chunk) = frame.data_ref() {
            collected.extend_from_slice(chunk);
            if collected.len() > MAX_BODY_SIZE {
                return Err(StatusCode::PAYLOAD_TOO_LARGE);
            }
        }
    }
    Ok(collected)
}

fn not_found() -> Response<BoxBody> {
    status_response(StatusCode::NOT_FOUND, "not found")
}

fn status_response(status: StatusCode, message: &str) -> Response<BoxBody> {
    Response::builder()
        .status(status)
        .body(full_body(message.to_string()))
        .unwrap()
}

fn full_body(text: String) -> BoxBody {
    Full::new(Bytes::from(text)).map_err(|never| match never {}).boxed_unsync()
}

fn empty_body() -> BoxBody {
    Full::new(Bytes::new()).map_err(|never| match never {}).boxed_unsync()
}
