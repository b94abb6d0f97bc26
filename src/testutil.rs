//! Shared test doubles: scripted fetcher, recording lifecycle host.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use crate::config::Config;
use crate::models::{ResourceRequest, ResponseSnapshot};
use crate::net::{FetchError, Fetcher};
use crate::store::{CacheStorage, GenerationStore, MemoryStorage};
use crate::worker::LifecycleHost;

pub(crate) fn sample_config() -> Config {
    Config {
        generation: "garden-v2".to_string(),
        app_origin: "https://example.app".to_string(),
        mandatory: vec!["/".to_string(), "/index.html".to_string()],
        optional: Vec::new(),
        cdn_hosts: vec!["unpkg.com".to_string()],
        offline_fallback: "/index.html".to_string(),
    }
}

/// Fetcher that serves scripted snapshots by URL. Any URL without a script
/// fails as unreachable, which doubles as the "network is down" case.
pub(crate) struct MockFetcher {
    routes: Mutex<HashMap<String, ResponseSnapshot>>,
    calls: Mutex<Vec<String>>,
}

impl MockFetcher {
    pub(crate) fn new() -> Self {
        Self {
            routes: Mutex::new(HashMap::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn serve(&self, url: &str, snapshot: ResponseSnapshot) {
        self.routes.lock().unwrap().insert(url.to_string(), snapshot);
    }

    /// Drop every route: the network is now unreachable.
    pub(crate) fn clear(&self) {
        self.routes.lock().unwrap().clear();
    }

    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Fetcher for MockFetcher {
    async fn fetch(&self, request: &ResourceRequest) -> Result<ResponseSnapshot, FetchError> {
        self.calls.lock().unwrap().push(request.url.to_string());
        match self.routes.lock().unwrap().get(request.url.as_str()) {
            Some(snapshot) => Ok(snapshot.clone()),
            None => Err(FetchError::unreachable(format!(
                "no route to {}",
                request.url
            ))),
        }
    }
}

/// Lifecycle host that records which signals it received.
pub(crate) struct RecordingHost {
    skip_waiting: AtomicBool,
    claimed: AtomicBool,
}

impl RecordingHost {
    pub(crate) fn new() -> Self {
        Self {
            skip_waiting: AtomicBool::new(false),
            claimed: AtomicBool::new(false),
        }
    }

    pub(crate) fn skip_waiting_called(&self) -> bool {
        self.skip_waiting.load(Ordering::SeqCst)
    }

    pub(crate) fn clients_claimed(&self) -> bool {
        self.claimed.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LifecycleHost for RecordingHost {
    async fn skip_waiting(&self) {
        self.skip_waiting.store(true, Ordering::SeqCst);
    }

    async fn claim_clients(&self) {
        self.claimed.store(true, Ordering::SeqCst);
    }
}

/// Wait for a detached background write to land. Returns whether the entry
/// reached the expected body before the deadline.
pub(crate) async fn poll_entry(
    storage: &MemoryStorage,
    generation: &str,
    key: &str,
    expected_body: &str,
) -> bool {
    for _ in 0..200 {
        let store = storage.open(generation).await.unwrap();
        if let Ok(Some(snapshot)) = store.get(key).await {
            if snapshot.body_text() == expected_body {
                return true;
            }
        }
        tokio::task::yield_now().await;
        tokio::time::sleep(Duration::from_millis(2)).await;
    }
    false
}
