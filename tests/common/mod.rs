//! Shared utilities for integration testing.

use std::fs;
use std::sync::Arc;
use std::time::Duration;

use tempfile::NamedTempFile;
use tokio::net::TcpListener;

use firmware_catalog::catalog::loader::load_catalog;
use firmware_catalog::config::ServiceConfig;
use firmware_catalog::http::HttpServer;
use firmware_catalog::lifecycle::Shutdown;

/// A running service instance backed by an on-disk catalog fixture.
pub struct TestService {
    pub base_url: String,
    pub shutdown: Arc<Shutdown>,
    /// Keeps the catalog file alive (and the path valid) for the test.
    #[allow(dead_code)]
    pub catalog_file: NamedTempFile,
}

impl TestService {
    pub fn stop(&self) {
        self.shutdown.trigger();
    }
}

/// Write the catalog JSON to a temp file and start the service on an
/// ephemeral port. Waits until the health endpoint answers.
#[allow(dead_code)]
pub async fn start_service(catalog_json: &str) -> TestService {
    start_service_with(catalog_json, |_| {}).await
}

/// Like [`start_service`], but lets the test adjust the config before
/// the server starts (listener address and catalog path are set here).
pub async fn start_service_with(
    catalog_json: &str,
    configure: impl FnOnce(&mut ServiceConfig),
) -> TestService {
    let catalog_file = NamedTempFile::new().unwrap();
    fs::write(catalog_file.path(), catalog_json).unwrap();

    let mut config = ServiceConfig::default();
    config.listener.bind_address = "127.0.0.1:0".to_string();
    config.catalog.path = catalog_file.path().to_path_buf();
    configure(&mut config);

    let catalog = load_catalog(catalog_file.path()).unwrap();

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let base_url = format!("http://{}", addr);

    let shutdown = Arc::new(Shutdown::new());
    let server = HttpServer::new(config, catalog);

    let server_shutdown = shutdown.clone();
    tokio::spawn(async move {
        server
            .run_with_shutdown(listener, &server_shutdown)
            .await
            .unwrap();
    });

    wait_until_healthy(&base_url).await;

    TestService {
        base_url,
        shutdown,
        catalog_file,
    }
}

/// Poll the health endpoint until the server accepts requests.
async fn wait_until_healthy(base_url: &str) {
    let client = reqwest::Client::new();
    for _ in 0..50 {
        if let Ok(res) = client.get(format!("{}/health", base_url)).send().await {
            if res.status().is_success() {
                return;
            }
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    panic!("service did not become healthy at {}", base_url);
}
