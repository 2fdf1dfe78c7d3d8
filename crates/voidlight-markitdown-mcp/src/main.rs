//! Entry point: a single binary that runs either the STDIO transport
//! (default, for MCP clients that spawn a subprocess) or the HTTP
//! transport (`--http`), exposing `convert_to_markdown` and
//! `convert_korean_document` as MCP tools.

use std::net::SocketAddr;

use clap::Parser;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};
use voidlight_markitdown_mcp::build_dispatcher;
use voidlight_session::SessionStore;
use voidlight_transport::HttpTransport;

#[derive(Parser, Debug)]
#[command(name = "voidlight-markitdown-mcp")]
#[command(about = "MCP server that converts documents to Markdown, Korean-aware")]
struct Args {
    /// Run the HTTP transport instead of STDIO.
    #[arg(long, alias = "sse")]
    http: bool,

    /// Host to bind when running the HTTP transport.
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Port to bind when running the HTTP transport.
    #[arg(long, default_value = "3001")]
    port: u16,
}

fn init_logging() {
    let level = std::env::var("VOIDLIGHT_LOG_LEVEL").unwrap_or_else(|_| "INFO".to_string());
    let filter = EnvFilter::try_new(level.to_lowercase()).unwrap_or_else(|_| EnvFilter::new("info"));

    // Logging must never touch stdout: the STDIO transport's wire protocol
    // is line-delimited JSON on that stream. Everything goes to stderr,
    // optionally duplicated to a file.
    let stderr_layer = fmt::layer().with_writer(std::io::stderr);

    let registry = tracing_subscriber::registry().with(filter).with(stderr_layer);

    if let Ok(path) = std::env::var("VOIDLIGHT_LOG_FILE") {
        match std::fs::File::options().create(true).append(true).open(&path) {
            Ok(file) => {
                let file_layer = fmt::layer().with_writer(std::sync::Mutex::new(file)).with_ansi(false);
                registry.with(file_layer).init();
            }
            Err(err) => {
                registry.init();
                tracing::warn!(%path, %err, "failed to open VOIDLIGHT_LOG_FILE, logging to stderr only");
            }
        }
    } else {
        registry.init();
    }
}

#[tokio::main]
async fn main() {
    init_logging();

    let plugins_enabled = std::env::var("VOIDLIGHT_MARKITDOWN_ENABLE_PLUGINS")
        .map(|v| matches!(v.to_lowercase().as_str(), "true" | "1" | "yes"))
        .unwrap_or(false);
    tracing::info!(plugins_enabled, "voidlight_markitdown starting");

    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };

    let dispatcher = build_dispatcher();

    if args.http {
        let addr: SocketAddr = match format!("{}:{}", args.host, args.port).parse() {
            Ok(addr) => addr,
            Err(err) => {
                eprintln!("invalid --host/--port: {err}");
                std::process::exit(1);
            }
        };
        let transport = HttpTransport::new(dispatcher, SessionStore::default());
        if let Err(err) = transport.run(addr).await {
            tracing::error!(%err, "HTTP transport failed to start");
            std::process::exit(2);
        }
    } else {
        let stdin = tokio::io::stdin();
        let stdout = tokio::io::stdout();
        if let Err(err) = voidlight_transport::run_stdio(dispatcher, stdin, stdout).await {
            tracing::error!(%err, "STDIO transport failed");
            std::process::exit(2);
        }
    }
}
