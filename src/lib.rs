//! Sitecache - an offline-first asset cache core.
//!
//! This crate implements the caching engine that sits between an application
//! and the network: it pre-populates a versioned cache generation at install
//! time, purges stale generations at activation, and routes every intercepted
//! GET request through a cache-first (same-origin) or network-first (CDN)
//! strategy with an offline fallback document as the last resort.
//!
//! The persistent store, the network fetch primitive, and the lifecycle host
//! are trait seams; `DiskStorage`, `MemoryStorage`, and `HttpFetcher` are the
//! provided implementations.

pub mod config;
pub mod models;
pub mod net;
pub mod store;
pub mod worker;

#[cfg(test)]
pub(crate) mod testutil;

pub use config::Config;
pub use models::{Destination, ResourceRequest, ResponseSnapshot};
pub use net::{FetchError, Fetcher, HttpFetcher};
pub use store::{CacheStorage, DiskStorage, GenerationStore, MemoryStorage, StoreError};
pub use worker::{
    Activator, Event, EventOutcome, InstallError, Installer, LifecycleHost, NoopHost,
    OfflineWorker, RouteOutcome, Router,
};
