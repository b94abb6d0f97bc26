//! Per-request routing: cache-first for same-origin, network-first for CDN.

use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::config::Config;
use crate::models::{Destination, ResourceRequest, ResponseSnapshot};
use crate::net::Fetcher;
use crate::store::{CacheStorage, GenerationStore, StoreError};

/// What the router decided to do with an intercepted request.
#[derive(Debug)]
pub enum RouteOutcome {
    /// The worker produced the response the caller should observe.
    Handled(ResponseSnapshot),
    /// Not intercepted; default network handling applies.
    PassThrough,
}

impl RouteOutcome {
    pub fn into_response(self) -> Option<ResponseSnapshot> {
        match self {
            RouteOutcome::Handled(snapshot) => Some(snapshot),
            RouteOutcome::PassThrough => None,
        }
    }

    pub fn is_pass_through(&self) -> bool {
        matches!(self, RouteOutcome::PassThrough)
    }
}

/// Dispatches every intercepted request to a strategy based on its origin.
///
/// Same-origin requests are cache-first with a detached background refresh on
/// every hit (stale-while-revalidate: the caller sees the refreshed content on
/// the next request, not this one). Designated CDN hosts are network-first
/// with cache fallback. Everything else passes through.
#[derive(Clone)]
pub struct Router {
    config: Arc<Config>,
    storage: Arc<dyn CacheStorage>,
    fetcher: Arc<dyn Fetcher>,
}

impl Router {
    pub fn new(
        config: Arc<Config>,
        storage: Arc<dyn CacheStorage>,
        fetcher: Arc<dyn Fetcher>,
    ) -> Self {
        Self {
            config,
            storage,
            fetcher,
        }
    }

    /// Route one request. Always terminates in a concrete outcome; a network
    /// failure never surfaces to the caller as an error.
    pub async fn route(&self, request: ResourceRequest) -> RouteOutcome {
        // Mutating requests are never served from cache or duplicated.
        if !request.is_get() {
            return RouteOutcome::PassThrough;
        }

        if self.config.is_same_origin(&request.url) {
            RouteOutcome::Handled(self.cache_first(request).await)
        } else if self.config.is_cdn_host(&request.url) {
            RouteOutcome::Handled(self.network_first(request).await)
        } else {
            RouteOutcome::PassThrough
        }
    }

    async fn cache_first(&self, request: ResourceRequest) -> ResponseSnapshot {
        match self.lookup(&request).await {
            Some(snapshot) => {
                debug!(
                    url = %request.url,
                    age_minutes = snapshot.age_minutes(),
                    "cache hit, refreshing in background"
                );
                // Dropping the handle detaches the refresh from the response.
                let _refresh = self.spawn_refresh(request);
                snapshot
            }
            None => self.refresh_and_store(&request).await,
        }
    }

    async fn network_first(&self, request: ResourceRequest) -> ResponseSnapshot {
        match self.fetcher.fetch(&request).await {
            Ok(snapshot) => {
                // Store a clone without delaying the live response.
                let router = self.clone();
                let clone = snapshot.clone();
                let _store = tokio::spawn(async move {
                    router.store_snapshot(&request, clone).await;
                });
                snapshot
            }
            Err(e) => {
                warn!(url = %request.url, error = %e, "network-first fetch failed, trying cache");
                match self.lookup(&request).await {
                    Some(snapshot) => snapshot,
                    None => ResponseSnapshot::service_unavailable(),
                }
            }
        }
    }

    /// Fetch over the network and store the result in the current generation.
    ///
    /// Total: a received response (any status) is stored and returned; a
    /// network failure degrades to the offline fallback document for
    /// navigations, or a synthesized 503 otherwise.
    pub async fn refresh_and_store(&self, request: &ResourceRequest) -> ResponseSnapshot {
        match self.fetcher.fetch(request).await {
            Ok(snapshot) => {
                self.store_snapshot(request, snapshot.clone()).await;
                snapshot
            }
            Err(e) => {
                warn!(url = %request.url, error = %e, "fetch failed, serving fallback");
                self.offline_fallback(request).await
            }
        }
    }

    fn spawn_refresh(&self, request: ResourceRequest) -> JoinHandle<()> {
        let router = self.clone();
        tokio::spawn(async move {
            // refresh_and_store is total; nothing to propagate.
            let _ = router.refresh_and_store(&request).await;
        })
    }

    async fn open_current(&self) -> Result<Arc<dyn GenerationStore>, StoreError> {
        self.storage.open(&self.config.generation).await
    }

    /// Cache lookup; store errors count as a miss.
    async fn lookup(&self, request: &ResourceRequest) -> Option<ResponseSnapshot> {
        let store = match self.open_current().await {
            Ok(store) => store,
            Err(e) => {
                warn!(error = %e, "could not open generation store");
                return None;
            }
        };
        match store.get(&request.cache_key()).await {
            Ok(entry) => entry,
            Err(e) => {
                warn!(url = %request.url, error = %e, "cache lookup failed");
                None
            }
        }
    }

    async fn store_snapshot(&self, request: &ResourceRequest, snapshot: ResponseSnapshot) {
        match self.open_current().await {
            Ok(store) => {
                if let Err(e) = store.put(&request.cache_key(), snapshot).await {
                    warn!(url = %request.url, error = %e, "failed to store response");
                }
            }
            Err(e) => warn!(error = %e, "could not open generation store"),
        }
    }

    async fn offline_fallback(&self, request: &ResourceRequest) -> ResponseSnapshot {
        if request.destination == Destination::Document {
            if let Ok(url) = self.config.offline_fallback_url() {
                let key = ResourceRequest::get(url).cache_key();
                if let Ok(store) = self.open_current().await {
                    if let Ok(Some(snapshot)) = store.get(&key).await {
                        return snapshot;
                    }
                }
                // Always pre-cached by install; absence is a broken deploy.
                warn!(fallback = %self.config.offline_fallback, "offline fallback document missing");
            }
        }
        ResponseSnapshot::service_unavailable()
    }
}
