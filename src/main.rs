//! Firmware Catalog Service
//!
//! An HTTP service that serves a read-only firmware catalog and answers
//! checksum-verification lookups for flashing clients.
//!
//! # Architecture Overview
//!
//! ```text
//!                       ┌──────────────────────────────────────────────┐
//!                       │             FIRMWARE CATALOG SERVICE          │
//!                       │                                               │
//!   Client Request      │  ┌─────────┐    ┌──────────┐    ┌─────────┐  │
//!   ────────────────────┼─▶│  http   │───▶│ handlers │───▶│ catalog │  │
//!                       │  │ server  │    │ (lookup) │    │  store  │  │
//!                       │  └─────────┘    └──────────┘    └────┬────┘  │
//!                       │                                      │       │
//!   Client Response     │                                      ▼       │
//!   ◀───────────────────┼──────────────────────────────┌─────────────┐ │
//!                       │                              │   catalog   │ │
//!                       │                              │ loader/watch│◀┼── catalog.json
//!                       │                              └─────────────┘ │
//!                       │                                               │
//!                       │  ┌─────────────────────────────────────────┐ │
//!                       │  │          Cross-Cutting Concerns          │ │
//!                       │  │  ┌────────┐ ┌─────────────┐ ┌─────────┐ │ │
//!                       │  │  │ config │ │observability│ │lifecycle│ │ │
//!                       │  │  └────────┘ └─────────────┘ └─────────┘ │ │
//!                       │  └─────────────────────────────────────────┘ │
//!                       └──────────────────────────────────────────────┘
//! ```

use clap::Parser;
use std::path::PathBuf;
use tokio::net::TcpListener;

use firmware_catalog::catalog::loader::load_catalog;
use firmware_catalog::config::loader::load_config;
use firmware_catalog::config::ServiceConfig;
use firmware_catalog::http::HttpServer;
use firmware_catalog::observability::logging;

#[derive(Parser)]
#[command(name = "firmware-catalog")]
#[command(about = "Firmware catalog service with checksum verification lookups")]
struct Args {
    /// Path to the service configuration file (TOML).
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init_logging();

    tracing::info!("firmware-catalog v{} starting", env!("CARGO_PKG_VERSION"));

    let args = Args::parse();

    // Load configuration, falling back to defaults when no file is given
    let config = match args.config {
        Some(path) => load_config(&path)?,
        None => ServiceConfig::default(),
    };

    tracing::info!(
        bind_address = %config.listener.bind_address,
        max_connections = config.listener.max_connections,
        catalog_path = %config.catalog.path.display(),
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    // Load the catalog once at startup; the handler layer only ever sees
    // an injected snapshot, never global mutable state.
    let catalog = load_catalog(&config.catalog.path)?;
    tracing::info!(
        firmware_records = catalog.firmware_count(),
        device_families = catalog.family_count(),
        projects = catalog.project_count(),
        "Catalog loaded"
    );

    // Bind TCP listener
    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let local_addr = listener.local_addr()?;

    tracing::info!(
        address = %local_addr,
        "Listening for connections"
    );

    // Initialize metrics exporter
    if config.observability.metrics_enabled {
        if let Ok(addr) = config.observability.metrics_address.parse() {
            firmware_catalog::observability::metrics::init_metrics(addr);
        } else {
            tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            );
        }
    }

    // Create and run HTTP server
    let server = HttpServer::new(config, catalog);
    server.run(listener).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
