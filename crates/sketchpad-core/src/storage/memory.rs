//! In-memory storage implementation.

use super::{BoxFuture, Storage, StorageError, StorageResult};
use std::collections::HashMap;
use std::sync::RwLock;

/// In-memory storage for testing and ephemeral use.
#[derive(Default)]
pub struct MemoryStorage {
    blobs: RwLock<HashMap<String, Vec<u8>>>,
}

impl MemoryStorage {
    /// Create a new empty memory storage.
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_error(e: impl std::fmt::Display) -> StorageError {
    StorageError::Other(format!("Lock error: {}", e))
}

impl Storage for MemoryStorage {
    fn put(&self, key: &str, data: &[u8]) -> BoxFuture<'_, StorageResult<()>> {
        let key = key.to_string();
        let data = data.to_vec();
        Box::pin(async move {
            let mut blobs = self.blobs.write().map_err(lock_error)?;
            blobs.insert(key, data);
            Ok(())
        })
    }

    fn get(&self, key: &str) -> BoxFuture<'_, StorageResult<Option<Vec<u8>>>> {
        let key = key.to_string();
        Box::pin(async move {
            let blobs = self.blobs.read().map_err(lock_error)?;
            Ok(blobs.get(&key).cloned())
        })
    }

    fn delete(&self, key: &str) -> BoxFuture<'_, StorageResult<()>> {
        let key = key.to_string();
        Box::pin(async move {
            let mut blobs = self.blobs.write().map_err(lock_error)?;
            blobs.remove(&key);
            Ok(())
        })
    }

    fn exists(&self, key: &str) -> BoxFuture<'_, StorageResult<bool>> {
        let key = key.to_string();
        Box::pin(async move {
            let blobs = self.blobs.read().map_err(lock_error)?;
            Ok(blobs.contains_key(&key))
        })
    }
}
