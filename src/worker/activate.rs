//! Activate phase: purge superseded generations, take over open clients.

use std::sync::Arc;

use futures::future;
use tracing::{info, warn};

use crate::config::Config;
use crate::store::CacheStorage;

use super::LifecycleHost;

/// Deletes every generation except the current one, then claims all
/// already-open client contexts. Individual deletions are best-effort;
/// activation itself never fails.
pub struct Activator {
    config: Arc<Config>,
    storage: Arc<dyn CacheStorage>,
    host: Arc<dyn LifecycleHost>,
}

impl Activator {
    pub fn new(
        config: Arc<Config>,
        storage: Arc<dyn CacheStorage>,
        host: Arc<dyn LifecycleHost>,
    ) -> Self {
        Self {
            config,
            storage,
            host,
        }
    }

    /// Run the activate phase. Idempotent: repeated runs find nothing left
    /// to delete.
    pub async fn activate(&self) {
        info!(generation = %self.config.generation, "activating");

        let names = match self.storage.list().await {
            Ok(names) => names,
            Err(e) => {
                warn!(error = %e, "could not list generations");
                Vec::new()
            }
        };

        // Fan out deletions; one failure must not block the siblings.
        let stale: Vec<String> = names
            .into_iter()
            .filter(|name| *name != self.config.generation)
            .collect();
        future::join_all(stale.iter().map(|name| async move {
            match self.storage.delete(name).await {
                Ok(true) => info!(generation = %name, "deleted old generation"),
                Ok(false) => {}
                Err(e) => warn!(generation = %name, error = %e, "failed to delete old generation"),
            }
        }))
        .await;

        // Cleanup is complete; take over every open client context.
        self.host.claim_clients().await;
    }
}
