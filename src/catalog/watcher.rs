//! Catalog file watcher for hot reload.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use arc_swap::ArcSwap;
use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};

use crate::catalog::loader::load_catalog;
use crate::catalog::store::Catalog;

/// A watcher that monitors the catalog file for changes.
///
/// On change, the file is re-parsed and the shared snapshot is swapped
/// atomically. A file that fails to parse keeps the current catalog.
pub struct CatalogWatcher {
    path: PathBuf,
    shared: Arc<ArcSwap<Catalog>>,
}

impl CatalogWatcher {
    /// Create a new CatalogWatcher updating the given shared snapshot.
    pub fn new(path: &Path, shared: Arc<ArcSwap<Catalog>>) -> Self {
        Self {
            path: path.to_path_buf(),
            shared,
        }
    }

    /// Start watching the file in a background thread.
    pub fn run(self) -> Result<RecommendedWatcher, notify::Error> {
        let shared = self.shared.clone();
        let path = self.path.clone();

        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) => {
                    if event.kind.is_modify() || event.kind.is_create() {
                        tracing::info!("Catalog file change detected, reloading...");
                        match load_catalog(&path) {
                            Ok(new_catalog) => {
                                let count = new_catalog.firmware_count();
                                shared.store(Arc::new(new_catalog));
                                crate::observability::metrics::record_catalog_size(count);
                                tracing::info!(firmware_records = count, "Catalog reloaded");
                            }
                            Err(e) => {
                                tracing::error!(
                                    "Failed to reload catalog: {}. Keeping current catalog.",
                                    e
                                );
                            }
                        }
                    }
                }
                Err(e) => tracing::error!("Watch error: {:?}", e),
            },
            Config::default().with_poll_interval(Duration::from_secs(2)),
        )?;

        watcher.watch(&self.path, RecursiveMode::NonRecursive)?;

        tracing::info!(path = ?self.path, "Catalog watcher started");
        Ok(watcher)
    }
}
