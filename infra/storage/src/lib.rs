//! Host key-value stores.
//!
//! The vault sits on top of a deliberately small persistence surface: string keys, string
//! values, synchronous `get`/`set`/`remove`, no native encryption and no transactions. This
//! crate defines that surface as the [`HostStore`] trait and ships two implementations:
//!
//! - **[`MemoryStore`]**: a shared in-process map for tests and ephemeral sessions.
//! - **[`FileStore`]**: a sandboxed directory with one file per key and atomic writes
//!   (unique temp file + `fsync` + rename), with stale temp cleanup on connect.
//!
//! With the `testing` feature, [`testing::FlakyStore`] wraps any store and injects
//! failures, to exercise quota-exceeded and storage-disabled paths.
//!
//! # Example
//!
//! ```rust
//! use hearth_storage::{HostStore, MemoryStore};
//!
//! let store = MemoryStore::new();
//! store.set("recovery.consent", "true").unwrap();
//! assert_eq!(store.get("recovery.consent").unwrap().as_deref(), Some("true"));
//! ```

mod builder;
mod error;
mod file;
mod key;
mod maintenance;
mod memory;
#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use builder::FileStoreBuilder;
pub use error::{StorageError, StorageErrorExt};
pub use file::FileStore;
pub use key::{MAX_KEY_LEN, StoreKey};
pub use memory::MemoryStore;

use std::fmt::Debug;
use std::sync::Arc;

/// The host persistent store consumed by the vault.
///
/// Implementations must treat `remove` of an absent key as success.
pub trait HostStore: Send + Sync + Debug {
    /// Returns the stored string, or `None` when the key is absent.
    ///
    /// # Errors
    /// Returns a [`StorageError`] if the key is invalid or the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Stores `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    /// Returns a [`StorageError`] if the key is invalid or the backend rejects the write.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Deletes `key`. Idempotent.
    ///
    /// # Errors
    /// Returns a [`StorageError`] if the key is invalid or the backend rejects the removal.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

impl<T: HostStore + ?Sized> HostStore for Arc<T> {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }
}
