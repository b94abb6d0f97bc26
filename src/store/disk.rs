//! Disk-backed cache storage.
//!
//! Layout: `<root>/<generation>/<sha256(key)>.json`, each file a serialized
//! `ResponseSnapshot`. The digest file name keeps arbitrary request URLs
//! filesystem-safe and collision-free.

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use sha2::{Digest, Sha256};
use tracing::debug;

use crate::models::ResponseSnapshot;

use super::{CacheStorage, GenerationStore, StoreError};

pub struct DiskStorage {
    root: PathBuf,
}

impl DiskStorage {
    pub fn new(root: PathBuf) -> Result<Self, StoreError> {
        std::fs::create_dir_all(&root)?;
        Ok(Self { root })
    }
}

#[async_trait]
impl CacheStorage for DiskStorage {
    async fn open(&self, name: &str) -> Result<Arc<dyn GenerationStore>, StoreError> {
        let dir = self.root.join(name);
        std::fs::create_dir_all(&dir)?;
        Ok(Arc::new(DiskStore { dir }))
    }

    async fn list(&self) -> Result<Vec<String>, StoreError> {
        let mut names = Vec::new();
        for entry in std::fs::read_dir(&self.root)? {
            let entry = entry?;
            if entry.file_type()?.is_dir() {
                if let Some(name) = entry.file_name().to_str() {
                    names.push(name.to_string());
                }
            }
        }
        names.sort();
        Ok(names)
    }

    async fn delete(&self, name: &str) -> Result<bool, StoreError> {
        let dir = self.root.join(name);
        if !dir.exists() {
            return Ok(false);
        }
        std::fs::remove_dir_all(&dir)?;
        debug!(generation = name, "deleted generation directory");
        Ok(true)
    }
}

struct DiskStore {
    dir: PathBuf,
}

impl DiskStore {
    fn entry_path(&self, key: &str) -> PathBuf {
        let mut hasher = Sha256::new();
        hasher.update(key.as_bytes());
        let digest = hex::encode(hasher.finalize());
        self.dir.join(format!("{}.json", digest))
    }
}

#[async_trait]
impl GenerationStore for DiskStore {
    async fn get(&self, key: &str) -> Result<Option<ResponseSnapshot>, StoreError> {
        let path = self.entry_path(key);
        if !path.exists() {
            return Ok(None);
        }
        let contents = std::fs::read_to_string(&path)?;
        let snapshot: ResponseSnapshot = serde_json::from_str(&contents)?;
        Ok(Some(snapshot))
    }

    async fn put(&self, key: &str, snapshot: ResponseSnapshot) -> Result<(), StoreError> {
        let path = self.entry_path(key);
        let contents = serde_json::to_string(&snapshot)?;
        std::fs::write(&path, contents)?;
        Ok(())
    }
}
