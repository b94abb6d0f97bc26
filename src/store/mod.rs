//! Persistent key-value store for cache generations.
//!
//! A `CacheStorage` manages named generations; a `GenerationStore` holds the
//! entries of one generation, keyed by canonicalized request descriptor.
//! Exactly one generation is current at a time; activation deletes the rest.
//!
//! Two implementations are provided:
//! - `DiskStorage`: one directory per generation, one JSON snapshot file per
//!   entry
//! - `MemoryStorage`: in-process maps, used by tests and short-lived hosts

pub mod disk;
pub mod memory;

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::ResponseSnapshot;

pub use disk::DiskStorage;
pub use memory::MemoryStorage;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("cache I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("cache entry corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// One generation's entries. Shared across all in-flight requests; each
/// get/put is individually atomic, no multi-key atomicity is assumed.
#[async_trait]
pub trait GenerationStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<ResponseSnapshot>, StoreError>;
    async fn put(&self, key: &str, snapshot: ResponseSnapshot) -> Result<(), StoreError>;
}

/// Provider of named generation stores.
#[async_trait]
pub trait CacheStorage: Send + Sync {
    /// Open a generation store, creating it if absent.
    async fn open(&self, name: &str) -> Result<Arc<dyn GenerationStore>, StoreError>;

    /// Names of every existing generation.
    async fn list(&self) -> Result<Vec<String>, StoreError>;

    /// Delete a generation wholesale. Returns whether it existed.
    async fn delete(&self, name: &str) -> Result<bool, StoreError>;
}
