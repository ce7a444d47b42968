//! Browser `localStorage` implementation for WebAssembly.
//!
//! `localStorage` only holds strings, so values are stored base64-encoded.

use super::{BoxFuture, Storage, StorageError, StorageResult};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

const KEY_PREFIX: &str = "sketchpad:";

/// `localStorage`-backed storage for WebAssembly.
///
/// Note: This is intentionally not Send/Sync since WASM is single-threaded.
#[derive(Default)]
pub struct LocalStorage;

impl LocalStorage {
    pub fn new() -> Self {
        Self
    }

    fn backend() -> StorageResult<web_sys::Storage> {
        let window = web_sys::window()
            .ok_or_else(|| StorageError::Other("No window object".to_string()))?;
        window
            .local_storage()
            .map_err(|e| StorageError::Other(format!("localStorage error: {:?}", e)))?
            .ok_or_else(|| StorageError::Other("localStorage not available".to_string()))
    }

    fn item_key(key: &str) -> String {
        format!("{KEY_PREFIX}{key}")
    }
}

impl Storage for LocalStorage {
    fn put(&self, key: &str, data: &[u8]) -> BoxFuture<'_, StorageResult<()>> {
        let key = Self::item_key(key);
        let encoded = STANDARD.encode(data);
        Box::pin(async move {
            Self::backend()?
                .set_item(&key, &encoded)
                .map_err(|e| StorageError::Io(format!("Failed to store {}: {:?}", key, e)))
        })
    }

    fn get(&self, key: &str) -> BoxFuture<'_, StorageResult<Option<Vec<u8>>>> {
        let key = Self::item_key(key);
        Box::pin(async move {
            let item = Self::backend()?
                .get_item(&key)
                .map_err(|e| StorageError::Io(format!("Failed to read {}: {:?}", key, e)))?;
            item.map(|encoded| {
                STANDARD
                    .decode(encoded)
                    .map_err(|e| StorageError::Encoding(e.to_string()))
            })
            .transpose()
        })
    }

    fn delete(&self, key: &str) -> BoxFuture<'_, StorageResult<()>> {
        let key = Self::item_key(key);
        Box::pin(async move {
            Self::backend()?
                .remove_item(&key)
                .map_err(|e| StorageError::Io(format!("Failed to delete {}: {:?}", key, e)))
        })
    }

    fn exists(&self, key: &str) -> BoxFuture<'_, StorageResult<bool>> {
        let key = Self::item_key(key);
        Box::pin(async move {
            let item = Self::backend()?
                .get_item(&key)
                .map_err(|e| StorageError::Io(format!("Failed to read {}: {:?}", key, e)))?;
            Ok(item.is_some())
        })
    }
}
