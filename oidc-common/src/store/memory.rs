use super::BlobStore;
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};
use thiserror::Error;

#[derive(Error, Debug)]
#[error("blob store lock poisoned")]
pub struct PoisonedError;

/// Keeps persisted blobs in process memory. Clones share the same blobs.
#[derive(Clone, Debug, Default)]
pub struct MemoryBlobStore {
    blobs: Arc<RwLock<BTreeMap<String, String>>>,
}

impl MemoryBlobStore {
    /// Storage keys currently holding a blob, in sorted order.
    pub fn keys(&self) -> Vec<String> {
        self.blobs.read().map(|blobs| blobs.keys().cloned().collect()).unwrap_or_default()
    }
}

impl BlobStore for MemoryBlobStore {
    type Error = PoisonedError;

    async fn read(&self, key: &str) -> Result<Option<String>, Self::Error> {
        Ok(self.blobs.read().map_err(|_| PoisonedError)?.get(key).cloned())
    }
    async fn write(&self, key: &str, blob: String) -> Result<(), Self::Error> {
        self.blobs.write().map_err(|_| PoisonedError)?.insert(key.to_string(), blob);
        Ok(())
    }
    async fn remove(&self, key: &str) -> Result<(), Self::Error> {
        self.blobs.write().map_err(|_| PoisonedError)?.remove(key);
        Ok(())
    }
    async fn clear(&self) -> Result<(), Self::Error> {
        self.blobs.write().map_err(|_| PoisonedError)?.clear();
        Ok(())
    }
}
