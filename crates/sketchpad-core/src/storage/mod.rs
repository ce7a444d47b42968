//! Key-value blob storage for saved drawings.

mod memory;

#[cfg(not(target_arch = "wasm32"))]
mod file;

#[cfg(target_arch = "wasm32")]
mod local;

pub use memory::MemoryStorage;

#[cfg(not(target_arch = "wasm32"))]
pub use file::FileStorage;

#[cfg(target_arch = "wasm32")]
pub use local::LocalStorage;

use std::future::Future;
use std::pin::Pin;
use thiserror::Error;

/// Key under which the current drawing is saved.
pub const DEFAULT_DRAWING_KEY: &str = "savedDrawing";

/// Storage errors.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Invalid key: {0:?}")]
    InvalidKey(String),
    #[error("Encoding error: {0}")]
    Encoding(String),
    #[error("IO error: {0}")]
    Io(String),
    #[error("Storage error: {0}")]
    Other(String),
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Boxed future for async operations (compatible with WASM).
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Trait for blob storage backends.
///
/// A missing key is not an error: `get` resolves to `Ok(None)`.
///
/// Note: On native platforms, implementations must be Send + Sync.
/// On WASM, these bounds are relaxed since it's single-threaded.
#[cfg(not(target_arch = "wasm32"))]
pub trait Storage: Send + Sync {
    /// Store `data` under `key`, overwriting any previous value.
    fn put(&self, key: &str, data: &[u8]) -> BoxFuture<'_, StorageResult<()>>;

    /// Fetch the value stored under `key`.
    fn get(&self, key: &str) -> BoxFuture<'_, StorageResult<Option<Vec<u8>>>>;

    /// Remove `key`. Removing a missing key succeeds.
    fn delete(&self, key: &str) -> BoxFuture<'_, StorageResult<()>>;

    /// Check if a value exists under `key`.
    fn exists(&self, key: &str) -> BoxFuture<'_, StorageResult<bool>>;
}

/// Trait for blob storage backends (WASM version without Send + Sync).
#[cfg(target_arch = "wasm32")]
pub trait Storage {
    /// Store `data` under `key`, overwriting any previous value.
    fn put(&self, key: &str, data: &[u8]) -> BoxFuture<'_, StorageResult<()>>;

    /// Fetch the value stored under `key`.
    fn get(&self, key: &str) -> BoxFuture<'_, StorageResult<Option<Vec<u8>>>>;

    /// Remove `key`. Removing a missing key succeeds.
    fn delete(&self, key: &str) -> BoxFuture<'_, StorageResult<()>>;

    /// Check if a value exists under `key`.
    fn exists(&self, key: &str) -> BoxFuture<'_, StorageResult<bool>>;
}

#[cfg(test)]
pub(crate) fn block_on<F: Future>(f: F) -> F::Output {
    // Simple blocking executor for tests
    use std::task::{Context, Poll, RawWaker, RawWakerVTable, Waker};

    fn dummy_raw_waker() -> RawWaker {
        fn no_op(_: *const ()) {}
        fn clone(_: *const ()) -> RawWaker {
            dummy_raw_waker()
        }
        static VTABLE: RawWakerVTable = RawWakerVTable::new(clone, no_op, no_op, no_op);
        RawWaker::new(std::ptr::null(), &VTABLE)
    }

    let waker = unsafe { Waker::from_raw(dummy_raw_waker()) };
    let mut cx = Context::from_waker(&waker);
    let mut f = std::pin::pin!(f);

    loop {
        if let Poll::Ready(result) = f.as_mut().poll(&mut cx) {
            return result;
        }
    }
}
