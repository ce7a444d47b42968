//! File-based storage implementation for native platforms.

use super::{BoxFuture, Storage, StorageError, StorageResult};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// File-based storage for native platforms.
///
/// Stores each value as `<key>.png` in a directory.
///
/// Characters other than ASCII letters, digits, `-` and `_` become `_` in the
/// file name, so keys differing only in those characters (`a:b`, `a_b`)
/// share one file.
pub struct FileStorage {
    /// Base directory for saved drawings.
    base_path: PathBuf,
}

impl FileStorage {
    /// Create a new file storage with the given base directory.
    ///
    /// Creates the directory if it doesn't exist.
    pub fn new(base_path: PathBuf) -> StorageResult<Self> {
        if !base_path.exists() {
            fs::create_dir_all(&base_path).map_err(|e| {
                StorageError::Io(format!("Failed to create storage directory: {}", e))
            })?;
        }
        Ok(Self { base_path })
    }

    /// Create file storage in the default location.
    ///
    /// On Unix: `~/.local/share/sketchpad/drawings/`
    /// On Windows: `%LOCALAPPDATA%\sketchpad\drawings\`
    pub fn default_location() -> StorageResult<Self> {
        let base = dirs::data_local_dir()
            .or_else(dirs::home_dir)
            .ok_or_else(|| StorageError::Io("Could not determine home directory".to_string()))?;

        Self::new(base.join("sketchpad").join("drawings"))
    }

    /// Get the file path for a key.
    fn blob_path(&self, key: &str) -> StorageResult<PathBuf> {
        if key.is_empty() {
            return Err(StorageError::InvalidKey(key.to_string()));
        }
        // Sanitize key to be safe for filenames
        let safe_key: String = key
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
            .collect();
        Ok(self.base_path.join(format!("{}.png", safe_key)))
    }

    /// Get the base path.
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }
}

impl Storage for FileStorage {
    fn put(&self, key: &str, data: &[u8]) -> BoxFuture<'_, StorageResult<()>> {
        let path = self.blob_path(key);
        let data = data.to_vec();

        Box::pin(async move {
            let path = path?;
            // Write a sibling temp file, then rename it over the target.
            let tmp = path.with_extension("png.tmp");
            fs::write(&tmp, &data).map_err(|e| {
                StorageError::Io(format!("Failed to write {}: {}", tmp.display(), e))
            })?;
            fs::rename(&tmp, &path).map_err(|e| {
                StorageError::Io(format!("Failed to replace {}: {}", path.display(), e))
            })
        })
    }

    fn get(&self, key: &str) -> BoxFuture<'_, StorageResult<Option<Vec<u8>>>> {
        let path = self.blob_path(key);

        Box::pin(async move {
            let path = path?;
            match fs::read(&path) {
                Ok(data) => Ok(Some(data)),
                Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
                Err(e) => Err(StorageError::Io(format!(
                    "Failed to read {}: {}",
                    path.display(),
                    e
                ))),
            }
        })
    }

    fn delete(&self, key: &str) -> BoxFuture<'_, StorageResult<()>> {
        let path = self.blob_path(key);

        Box::pin(async move {
            let path = path?;
            if path.exists() {
                fs::remove_file(&path).map_err(|e| {
                    StorageError::Io(format!("Failed to delete {}: {}", path.display(), e))
                })?;
            }
            Ok(())
        })
    }

    fn exists(&self, key: &str) -> BoxFuture<'_, StorageResult<bool>> {
        let path = self.blob_path(key);
        Box::pin(async move { Ok(path?.exists()) })
    }
}
