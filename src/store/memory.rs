//! In-memory cache storage.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::models::ResponseSnapshot;

use super::{CacheStorage, GenerationStore, StoreError};

type Entries = HashMap<String, ResponseSnapshot>;

/// Storage keeping every generation in process memory.
#[derive(Default)]
pub struct MemoryStorage {
    generations: Mutex<HashMap<String, Arc<MemoryStore>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CacheStorage for MemoryStorage {
    async fn open(&self, name: &str) -> Result<Arc<dyn GenerationStore>, StoreError> {
        let mut generations = self.generations.lock().await;
        let store = generations
            .entry(name.to_string())
            .or_insert_with(|| Arc::new(MemoryStore::default()))
            .clone();
        Ok(store)
    }

    async fn list(&self) -> Result<Vec<String>, StoreError> {
        let generations = self.generations.lock().await;
        let mut names: Vec<String> = generations.keys().cloned().collect();
        names.sort();
        Ok(names)
    }

    async fn delete(&self, name: &str) -> Result<bool, StoreError> {
        let mut generations = self.generations.lock().await;
        Ok(generations.remove(name).is_some())
    }
}

#[derive(Default)]
struct MemoryStore {
    entries: Mutex<Entries>,
}

#[async_trait]
impl GenerationStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<ResponseSnapshot>, StoreError> {
        let entries = self.entries.lock().await;
        Ok(entries.get(key).cloned())
    }

    async fn put(&self, key: &str, snapshot: ResponseSnapshot) -> Result<(), StoreError> {
        let mut entries = self.entries.lock().await;
        entries.insert(key.to_string(), snapshot);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_open_is_idempotent() {
        let storage = MemoryStorage::new();
        let a = storage.open("v1").await.unwrap();
        a.put("k", ResponseSnapshot::ok("v")).await.unwrap();

        // Re-opening yields the same backing store, not a fresh one
        let b = storage.open("v1").await.unwrap();
        assert!(b.get("k").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_delete_removes_generation() {
        let storage = MemoryStorage::new();
        storage.open("v1").await.unwrap();
        storage.open("v2").await.unwrap();

        assert!(storage.delete("v1").await.unwrap());
        assert_eq!(storage.list().await.unwrap(), vec!["v2"]);
        assert!(!storage.delete("v1").await.unwrap());
    }
}
