//! Sandboxed, file-per-key [`HostStore`] with atomic writes.

use crate::HostStore;
use crate::builder::FileStoreBuilder;
use crate::error::{StorageError, StorageErrorExt};
use crate::key::StoreKey;
use crate::maintenance;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::debug;

pub(crate) const ENTRY_SUFFIX: &str = "entry";
pub(crate) const TMP_MARKER: &str = ".hearthtmp.";

#[derive(Debug)]
pub struct FileStoreInner {
    /// Canonicalized directory holding one file per key.
    pub(crate) root: PathBuf,
    /// Counter used to build unique temporary file names.
    pub(crate) tmp_counter: AtomicU64,
}

/// A thread-safe handle to a directory-backed string store.
///
/// Every key maps to `<root>/<key>.entry`. Keys are validated by [`StoreKey`], so a key can
/// never name a path outside the root. Writes use the atomic swap pattern (unique temp file,
/// `fsync`, rename), so an entry is never observed half-written.
///
/// # Example
///
/// ```rust
/// use hearth_storage::{FileStore, HostStore, StorageError};
///
/// # fn main() -> Result<(), StorageError> {
/// # let tmp = tempfile::tempdir().unwrap();
/// let store = FileStore::builder().root(tmp.path().join("vault")).connect()?;
///
/// store.set("recovery.data", "{\"records\":{}}")?;
/// assert_eq!(store.get("recovery.data")?.as_deref(), Some("{\"records\":{}}"));
///
/// store.remove("recovery.data")?;
/// assert_eq!(store.get("recovery.data")?, None);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct FileStore {
    pub(crate) inner: Arc<FileStoreInner>,
}

impl FileStore {
    #[must_use = "The store is not initialized until you call .connect()"]
    pub fn builder() -> FileStoreBuilder {
        FileStoreBuilder::new()
    }

    /// The canonical root directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.inner.root
    }

    /// Physical path of the file backing `key`.
    ///
    /// # Errors
    /// Returns [`StorageError::InvalidKey`] if the key fails validation.
    pub fn resolve(&self, key: &str) -> Result<PathBuf, StorageError> {
        let key = StoreKey::try_from(key)?;
        Ok(self.inner.root.join(format!("{key}.{ENTRY_SUFFIX}")))
    }

    /// Removes stale temporary files left behind by interrupted writes.
    pub fn purge_tmp(&self) {
        maintenance::purge_tmp(&self.inner.root);
    }

    fn unique_tmp_path(&self, target: &Path) -> PathBuf {
        let counter = self.inner.tmp_counter.fetch_add(1, Ordering::Relaxed);
        let file_name = target.file_name().and_then(|s| s.to_str()).unwrap_or("entry");
        target.with_file_name(format!("{file_name}{TMP_MARKER}{}.{counter}", std::process::id()))
    }

    fn sync_dir(path: &Path) {
        match fs::File::open(path) {
            Ok(dir) => {
                if let Err(err) = dir.sync_all() {
                    tracing::warn!(path = %path.display(), error = %err, "Directory sync failed");
                }
            },
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "Directory open failed");
            },
        }
    }
}

impl HostStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let resolved = self.resolve(key)?;

        let bytes = match fs::read(&resolved) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => {
                return Err(StorageError::Io {
                    source: err,
                    context: Some(format!("Read failed: {}", resolved.display()).into()),
                });
            },
        };

        String::from_utf8(bytes)
            .map(Some)
            .context(format!("Entry is not UTF-8: {}", resolved.display()))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let resolved = self.resolve(key)?;
        let temp = self.unique_tmp_path(&resolved);

        {
            let mut file = fs::OpenOptions::new()
                .create_new(true)
                .write(true)
                .open(&temp)
                .context(format!("Temp creation failed: {}", temp.display()))?;
            file.write_all(value.as_bytes()).context("Write failed")?;
            file.sync_all().context("Hardware sync failed")?;
        }

        if let Err(err) = fs::rename(&temp, &resolved) {
            let _ = fs::remove_file(&temp);
            return Err(StorageError::Io {
                source: err,
                context: Some(
                    format!("Atomic swap failed: {} -> {}", temp.display(), resolved.display())
                        .into(),
                ),
            });
        }

        Self::sync_dir(&self.inner.root);

        debug!(key, "Entry saved atomically");
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let resolved = self.resolve(key)?;
        match fs::remove_file(&resolved) {
            Ok(()) => {
                debug!(key, "Entry removed");
                Ok(())
            },
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(StorageError::Io {
                source: err,
                context: Some(format!("Failed to delete: {}", resolved.display()).into()),
            }),
        }
    }
}
