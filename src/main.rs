//! Resource router server.
//!
//! ```text
//!     Client Request
//!     ─────────────▶ http server ─▶ route tree ──match──▶ 200 (JSON; empty for HEAD)
//!                                       │
//!                                    no match
//!                                       ▼
//!                               method negotiator ──path matched──▶ 405 + Allow
//!                                       │
//!                                  no decision ──▶ 404
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use resource_router::config::{load_config, RouterConfig};
use resource_router::http::HttpServer;
use resource_router::observability::{logging, metrics};

#[derive(Parser)]
#[command(name = "resource-router")]
#[command(about = "Resource router with HTTP method negotiation", long_about = None)]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => RouterConfig::default(),
    };

    logging::init_logging(&config.observability);
    tracing::info!("resource-router v{} starting", env!("CARGO_PKG_VERSION"));

    tracing::info!(
        bind_address = %config.listener.bind_address,
        routes = config.routes.len(),
        override_header = %config.overrides.header,
        override_param = %config.overrides.query_param,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr)?,
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let server = HttpServer::new(config)?;
    server.run(listener).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
