//! Lifecycle event dispatch.
//!
//! The surrounding host delivers exactly three event kinds; the worker
//! registers exactly one handler for each. Dispatch is a single match with
//! all dependencies injected at construction, so there is no ambient event
//! bus to reason about.

use std::sync::Arc;

use crate::config::Config;
use crate::models::ResourceRequest;
use crate::net::Fetcher;
use crate::store::CacheStorage;

use super::{Activator, InstallError, Installer, LifecycleHost, RouteOutcome, Router};

/// An event delivered by the lifecycle host.
#[derive(Debug)]
pub enum Event {
    /// A new version has been registered; pre-populate its generation.
    Install,
    /// This version has taken over; purge superseded generations.
    Activate,
    /// A request was intercepted; produce the response the caller observes.
    Fetch(ResourceRequest),
}

/// What the handler produced for the host.
#[derive(Debug)]
pub enum EventOutcome {
    /// Install finished. On error the host must abort activation of this
    /// version.
    Installed(Result<(), InstallError>),
    /// Activation finished; cleanup is best-effort and never fails.
    Activated,
    /// Routing decision for the intercepted request.
    Fetched(RouteOutcome),
}

/// The assembled engine: installer, activator and router sharing one
/// configuration and one storage.
pub struct OfflineWorker {
    installer: Installer,
    activator: Activator,
    router: Router,
}

impl OfflineWorker {
    pub fn new(
        config: Config,
        storage: Arc<dyn CacheStorage>,
        fetcher: Arc<dyn Fetcher>,
        host: Arc<dyn LifecycleHost>,
    ) -> Self {
        let config = Arc::new(config);
        Self {
            installer: Installer::new(
                Arc::clone(&config),
                Arc::clone(&storage),
                Arc::clone(&fetcher),
                Arc::clone(&host),
            ),
            activator: Activator::new(Arc::clone(&config), Arc::clone(&storage), host),
            router: Router::new(config, storage, fetcher),
        }
    }

    /// Handle one lifecycle event. The host is expected to extend the
    /// event's lifetime until this future completes.
    pub async fn dispatch(&self, event: Event) -> EventOutcome {
        match event {
            Event::Install => EventOutcome::Installed(self.installer.install().await),
            Event::Activate => {
                self.activator.activate().await;
                EventOutcome::Activated
            }
            Event::Fetch(request) => EventOutcome::Fetched(self.router.route(request).await),
        }
    }

    pub fn router(&self) -> &Router {
        &self.router
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{CacheStorage, MemoryStorage};
    use crate::testutil::{sample_config, MockFetcher, RecordingHost};
    use crate::ResponseSnapshot;
    use reqwest::Url;

    fn worker() -> (OfflineWorker, Arc<MemoryStorage>, Arc<MockFetcher>, Arc<RecordingHost>) {
        let storage = Arc::new(MemoryStorage::new());
        let fetcher = Arc::new(MockFetcher::new());
        let host = Arc::new(RecordingHost::new());
        let worker = OfflineWorker::new(
            sample_config(),
            storage.clone(),
            fetcher.clone(),
            host.clone(),
        );
        (worker, storage, fetcher, host)
    }

    #[tokio::test]
    async fn test_full_lifecycle_install_activate_fetch() {
        let (worker, storage, fetcher, host) = worker();
        fetcher.serve("https://example.app/", ResponseSnapshot::ok("root"));
        fetcher.serve("https://example.app/index.html", ResponseSnapshot::ok("index"));
        storage.open("garden-v1").await.unwrap();

        let installed = worker.dispatch(Event::Install).await;
        assert!(matches!(installed, EventOutcome::Installed(Ok(()))));
        assert!(host.skip_waiting_called());

        worker.dispatch(Event::Activate).await;
        assert_eq!(storage.list().await.unwrap(), vec!["garden-v2"]);
        assert!(host.clients_claimed());

        // Network is gone; the pre-cached index still answers
        fetcher.clear();
        let request =
            ResourceRequest::get(Url::parse("https://example.app/index.html").unwrap());
        let fetched = worker.dispatch(Event::Fetch(request)).await;
        match fetched {
            EventOutcome::Fetched(RouteOutcome::Handled(snapshot)) => {
                assert_eq!(snapshot.body_text(), "index");
            }
            other => panic!("expected handled fetch, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_failed_install_reported_to_host() {
        let (worker, _storage, _fetcher, host) = worker();
        // No routes at all: the first mandatory fetch fails

        let outcome = worker.dispatch(Event::Install).await;

        assert!(matches!(outcome, EventOutcome::Installed(Err(_))));
        assert!(!host.skip_waiting_called());
    }
}
