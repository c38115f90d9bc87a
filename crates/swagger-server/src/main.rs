//! MCP server entry point for the swagger viewer.
//!
//! # Usage
//!
//! Run the server via stdio transport:
//!
//! ```bash
//! swagger-viewer
//! ```
//!
//! Or configure it in an MCP client:
//!
//! ```json
//! {
//!   "mcpServers": {
//!     "swagger-viewer": {
//!       "command": "swagger-viewer"
//!     }
//!   }
//! }
//! ```
//!
//! The document URL is read from `~/swagger.json`
//! (`{"swaggerUrl": "https://..."}`) unless given to `mcp_swagger_initialize`.

use anyhow::Result;
use clap::{Parser, ValueEnum};
use rmcp::ServiceExt;
use rmcp::transport::stdio;
use std::path::PathBuf;
use std::time::Duration;
use swagger_viewer_server::{ServerSettings, SwaggerService};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// MCP server for browsing OpenAPI/Swagger documents.
#[derive(Parser, Debug)]
#[command(name = "swagger-viewer")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Config file holding `swaggerUrl` (default: ~/swagger.json)
    #[arg(long, env = "SWAGGER_VIEWER_CONFIG")]
    config: Option<PathBuf>,

    /// Do not re-fetch the document when the config file changes
    #[arg(long)]
    no_watch: bool,

    /// Timeout in seconds for fetching the document
    #[arg(long, env = "SWAGGER_VIEWER_TIMEOUT", default_value_t = 30)]
    timeout_secs: u64,

    /// Fetch this document at startup instead of waiting for the first tool call
    #[arg(long, env = "SWAGGER_URL")]
    swagger_url: Option<String>,

    /// Log output format
    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

impl Cli {
    fn settings(&self) -> ServerSettings {
        let mut builder = ServerSettings::builder()
            .watch_config(!self.no_watch)
            .http_timeout(Duration::from_secs(self.timeout_secs));
        if let Some(path) = &self.config {
            builder = builder.config_path(path);
        }
        builder.build()
    }
}

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,swagger_viewer_server=debug"));

    // stderr only: stdout carries the MCP protocol
    let registry = tracing_subscriber::registry().with(filter);
    match format {
        LogFormat::Text => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true),
            )
            .init(),
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_target(true),
            )
            .init(),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_format);

    tracing::info!("Starting swagger-viewer v{}", env!("CARGO_PKG_VERSION"));

    let service = SwaggerService::new(cli.settings())?;

    if let Some(url) = cli.swagger_url.as_deref() {
        match service.api().initialize(Some(url)).await {
            Ok(result) => tracing::info!("Preloaded {} endpoints", result.endpoint_count),
            Err(e) => tracing::warn!("Startup initialization failed: {e}"),
        }
    }

    let api = service.api().clone();
    let running = service.serve(stdio()).await?;
    running.waiting().await?;

    api.shutdown().await;
    tracing::info!("Server shutdown complete");
    Ok(())
}
