//! Install phase: pre-populate a fresh cache generation.

use std::sync::Arc;

use futures::stream::{self, StreamExt};
use reqwest::Url;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::models::ResourceRequest;
use crate::net::{FetchError, Fetcher};
use crate::store::{CacheStorage, StoreError};

use super::LifecycleHost;

/// Maximum concurrent fetches during the optional install phase.
/// Keeps the fan-out polite to CDN hosts.
const MAX_CONCURRENT_FETCHES: usize = 4;

#[derive(Error, Debug)]
pub enum InstallError {
    #[error("mandatory resource {url} failed: {source}")]
    Mandatory {
        url: String,
        #[source]
        source: FetchError,
    },

    #[error("mandatory resource {url} returned status {status}")]
    MandatoryStatus { url: String, status: u16 },

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("invalid configuration: {0}")]
    Config(#[from] anyhow::Error),
}

/// Populates a newly created generation: every mandatory same-origin
/// resource must be stored or the whole install fails; cross-origin
/// optional resources are cached best-effort.
pub struct Installer {
    config: Arc<Config>,
    storage: Arc<dyn CacheStorage>,
    fetcher: Arc<dyn Fetcher>,
    host: Arc<dyn LifecycleHost>,
}

impl Installer {
    pub fn new(
        config: Arc<Config>,
        storage: Arc<dyn CacheStorage>,
        fetcher: Arc<dyn Fetcher>,
        host: Arc<dyn LifecycleHost>,
    ) -> Self {
        Self {
            config,
            storage,
            fetcher,
            host,
        }
    }

    /// Run the install phase. Safe to call repeatedly: a re-run overwrites
    /// existing entries with fresh fetches.
    pub async fn install(&self) -> Result<(), InstallError> {
        info!(generation = %self.config.generation, "installing");
        let store = self.storage.open(&self.config.generation).await?;

        // Mandatory resources, in order. Any network error or non-success
        // status aborts the install so the generation never activates.
        for path in &self.config.mandatory {
            let url = self.config.resolve(path)?;
            let request = ResourceRequest::get(url);
            let snapshot =
                self.fetcher
                    .fetch(&request)
                    .await
                    .map_err(|source| InstallError::Mandatory {
                        url: request.url.to_string(),
                        source,
                    })?;
            if !snapshot.is_success() {
                return Err(InstallError::MandatoryStatus {
                    url: request.url.to_string(),
                    status: snapshot.status,
                });
            }
            store.put(&request.cache_key(), snapshot).await?;
        }
        debug!(count = self.config.mandatory.len(), "cached core files");

        // Optional resources, concurrently. Individual outcomes are logged
        // and swallowed; this phase always succeeds.
        stream::iter(&self.config.optional)
            .for_each_concurrent(MAX_CONCURRENT_FETCHES, |raw| {
                let store = Arc::clone(&store);
                async move {
                    let url = match Url::parse(raw) {
                        Ok(url) => url,
                        Err(e) => {
                            warn!(url = %raw, error = %e, "optional resource skipped");
                            return;
                        }
                    };
                    let request = ResourceRequest::get(url);
                    match self.fetcher.fetch(&request).await {
                        Ok(snapshot) if snapshot.is_success() => {
                            if let Err(e) = store.put(&request.cache_key(), snapshot).await {
                                warn!(url = %request.url, error = %e, "optional resource not stored");
                            }
                        }
                        Ok(snapshot) => {
                            warn!(url = %request.url, status = snapshot.status, "optional resource skipped");
                        }
                        Err(e) => {
                            warn!(url = %request.url, error = %e, "optional resource skipped");
                        }
                    }
                }
            })
            .await;

        self.host.skip_waiting().await;
        Ok(())
    }
}
