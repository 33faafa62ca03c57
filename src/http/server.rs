//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (tracing, body limits, timeout, request ID,
//!   concurrency limit)
//! - Inject the shared catalog snapshot into handlers
//! - Serve with graceful shutdown
//! - Spawn the catalog watcher when hot reload is enabled

use std::sync::atomic::AtomicUsize;
use std::sync::Arc;
use std::time::Duration;

use arc_swap::ArcSwap;
use axum::routing::{get, post};
use axum::Router;
use tokio::net::TcpListener;
use tower::limit::GlobalConcurrencyLimitLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::catalog::store::Catalog;
use crate::catalog::watcher::CatalogWatcher;
use crate::config::ServiceConfig;
use crate::http::handlers::{
    flash_verify, get_status, health, list_families, list_firmware, list_projects,
};
use crate::http::request::RequestIdLayer;
use crate::lifecycle::Shutdown;
use crate::observability::metrics;

/// Application state injected into handlers.
///
/// The catalog lives behind an `ArcSwap` so the watcher can replace the
/// whole snapshot atomically while handlers read a consistent view.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<ArcSwap<Catalog>>,
    pub request_count: Arc<AtomicUsize>,
}

/// HTTP server for the firmware catalog service.
pub struct HttpServer {
    router: Router,
    config: ServiceConfig,
    catalog: Arc<ArcSwap<Catalog>>,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration and catalog.
    pub fn new(config: ServiceConfig, catalog: Catalog) -> Self {
        metrics::record_catalog_size(catalog.firmware_count());

        let catalog = Arc::new(ArcSwap::from_pointee(catalog));
        let state = AppState {
            catalog: catalog.clone(),
            request_count: Arc::new(AtomicUsize::new(0)),
        };

        let router = Self::build_router(&config, state);
        Self {
            router,
            config,
            catalog,
        }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &ServiceConfig, state: AppState) -> Router {
        Router::new()
            .route("/api/flash_verify/", post(flash_verify))
            .route("/api/firmware_list/all/", get(list_firmware))
            .route("/api/firmware_family_list/", get(list_families))
            .route("/api/project_list/all/", get(list_projects))
            .route("/status", get(get_status))
            .route("/health", get(health))
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.timeouts.request_secs,
            )))
            .layer(RequestBodyLimitLayer::new(config.security.max_body_size))
            .layer(RequestIdLayer)
            .layer(TraceLayer::new_for_http())
            // Outermost: requests past the limit queue on a shared
            // semaphore before any other work happens
            .layer(GlobalConcurrencyLimitLayer::new(
                config.listener.max_connections,
            ))
    }

    /// Run the server, accepting connections on the given listener.
    ///
    /// Shuts down gracefully on Ctrl+C.
    pub async fn run(self, listener: TcpListener) -> Result<(), std::io::Error> {
        self.run_with_signal(listener, async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("Shutdown signal received");
        })
        .await
    }

    /// Run the server until the shutdown coordinator fires.
    pub async fn run_with_shutdown(
        self,
        listener: TcpListener,
        shutdown: &Shutdown,
    ) -> Result<(), std::io::Error> {
        let mut rx = shutdown.subscribe();
        self.run_with_signal(listener, async move {
            let _ = rx.recv().await;
        })
        .await
    }

    async fn run_with_signal<F>(self, listener: TcpListener, signal: F) -> Result<(), std::io::Error>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            "HTTP server starting"
        );

        // Spawn catalog watcher; the handle must stay alive for the
        // watch to remain registered
        let _watcher = if self.config.catalog.watch {
            match CatalogWatcher::new(&self.config.catalog.path, self.catalog.clone()).run() {
                Ok(watcher) => Some(watcher),
                Err(e) => {
                    tracing::error!(error = %e, "Failed to start catalog watcher");
                    None
                }
            }
        } else {
            None
        };

        let app = self.router.into_make_service();

        axum::serve(listener, app)
            .with_graceful_shutdown(signal)
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }
}
