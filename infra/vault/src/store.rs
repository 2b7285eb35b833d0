use crate::builder::{NoStore, VaultBuilder};
use crate::crypto::CryptoProvider;
use crate::error::{VaultError, VaultErrorExt};
use crate::keys::KeyManager;
use crate::types::{IV_LEN, PackedValue, WriteOutcome};
use hearth_storage::HostStore;
use parking_lot::Mutex;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, instrument, warn};

#[allow(unreachable_pub)]
#[derive(Debug)]
pub struct VaultInner {
    pub store: Arc<dyn HostStore>,
    pub crypto: Arc<dyn CryptoProvider>,
    pub keys: KeyManager,
    pub write_locks: Mutex<HashMap<String, Arc<tokio::sync::Mutex<()>>>>,
}

/// Encrypted JSON values over a [`HostStore`].
///
/// Every write serializes the value to JSON, encrypts it under the master key with a fresh
/// random IV (the entry key is bound in as associated data) and stores the packed string.
/// When the crypto path fails the value is stored as plaintext JSON instead, and reads
/// accept both forms. Reads and writes never return errors; failures are logged and
/// surface as [`WriteOutcome`] or `None`.
///
/// Cloning is cheap and clones share the same store, key and write locks.
///
/// ### Example
/// ```rust
/// use hearth_storage::MemoryStore;
/// use hearth_vault::{Vault, WriteOutcome};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> Result<(), hearth_vault::VaultError> {
/// let vault = Vault::builder().store(MemoryStore::new()).build()?;
///
/// assert_eq!(vault.set("recovery.consent", &true).await, WriteOutcome::Encrypted);
/// assert_eq!(vault.get::<bool>("recovery.consent").await, Some(true));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Vault {
    pub(crate) inner: Arc<VaultInner>,
}

impl Vault {
    #[must_use]
    pub fn builder() -> VaultBuilder<NoStore> {
        VaultBuilder::new()
    }

    /// The key manager owning the master key entry.
    #[must_use]
    pub fn keys(&self) -> &KeyManager {
        &self.inner.keys
    }

    /// Checks whether encryption works on this host by drawing random bytes.
    #[must_use]
    pub fn crypto_available(&self) -> bool {
        let mut nonce = [0u8; IV_LEN];
        self.inner.crypto.fill_random(&mut nonce).is_ok()
    }

    /// Stores `value` under `key`, encrypted when possible.
    ///
    /// Writes to the same key are applied one at a time in call order; the last write wins.
    #[instrument(skip(self, value), fields(key = %key))]
    pub async fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> WriteOutcome {
        let json = match serde_json::to_string(value) {
            Ok(json) => json,
            Err(e) => {
                warn!(error = %e, "Value is not serializable, nothing stored");
                return WriteOutcome::Failed;
            },
        };

        let lock = self.write_lock(key);
        let outcome = {
            let _guard = lock.lock().await;
            self.write_json(key, &json).await
        };
        drop(lock);
        self.release_write_lock(key);

        outcome
    }

    /// Reads and decodes the value under `key`.
    ///
    /// Returns `None` when the key is absent, the store cannot be read, or the value
    /// neither decrypts nor parses as plaintext JSON of type `T`.
    #[instrument(skip(self), fields(key = %key))]
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        match self.get_checked(key).await {
            Ok(value) => value,
            Err(e) => {
                warn!(error = %e, "Host store read failed");
                None
            },
        }
    }

    /// Like [`Vault::get`], but reports a host-store read failure instead of folding it
    /// into `None`. Undecodable values are still `Ok(None)`.
    ///
    /// # Errors
    /// Returns [`VaultError::Storage`] if the host store cannot be read.
    pub async fn get_checked<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, VaultError> {
        let Some(raw) = self.inner.store.get(key).context("Reading vault entry")? else {
            return Ok(None);
        };

        if PackedValue::is_packed(&raw) {
            match self.open(key, &raw) {
                Ok(plain) => match serde_json::from_slice(&plain) {
                    Ok(value) => return Ok(Some(value)),
                    Err(e) => debug!(error = %e, "Decrypted value has unexpected shape"),
                },
                Err(e) => debug!(error = %e, "Packed value did not decrypt, trying plaintext"),
            }
        }

        match serde_json::from_str(&raw) {
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                debug!(error = %e, "Stored value is unreadable");
                Ok(None)
            },
        }
    }

    /// Removes the entry under `key`. Returns `false` if the host store refused.
    #[instrument(skip(self), fields(key = %key))]
    pub async fn remove(&self, key: &str) -> bool {
        let lock = self.write_lock(key);
        let result = {
            let _guard = lock.lock().await;
            self.inner.store.remove(key)
        };
        drop(lock);
        self.release_write_lock(key);

        match result {
            Ok(()) => true,
            Err(e) => {
                warn!(error = %e, "Host store rejected removal");
                false
            },
        }
    }

    async fn write_json(&self, key: &str, json: &str) -> WriteOutcome {
        let sealed = match self.seal(key, json).await {
            Ok(packed) => match self.inner.store.set(key, &packed) {
                Ok(()) => return WriteOutcome::Encrypted,
                Err(e) => VaultError::from(e),
            },
            Err(e) => e,
        };

        warn!(error = %sealed, kind = sealed.kind(), "Encrypted write failed, storing plaintext");
        match self.inner.store.set(key, json) {
            Ok(()) => WriteOutcome::Plaintext,
            Err(e) => {
                warn!(error = %e, "Plaintext fallback rejected, nothing stored");
                WriteOutcome::Failed
            },
        }
    }

    async fn seal(&self, key: &str, json: &str) -> Result<String, VaultError> {
        let master = self.inner.keys.get_or_create_key().await?;

        let mut iv = [0u8; IV_LEN];
        self.inner.crypto.fill_random(&mut iv)?;

        let ciphertext = self.inner.crypto.encrypt(&master, &iv, key.as_bytes(), json.as_bytes())?;
        Ok(PackedValue { iv, ciphertext }.encode())
    }

    fn open(&self, key: &str, raw: &str) -> Result<Vec<u8>, VaultError> {
        let packed = PackedValue::decode(raw)?;
        let master = self.inner.keys.load_key()?.ok_or_else(|| VaultError::Decryption {
            message: "No master key".into(),
            context: None,
        })?;
        self.inner.crypto.decrypt(&master, &packed.iv, key.as_bytes(), &packed.ciphertext)
    }

    fn write_lock(&self, key: &str) -> Arc<tokio::sync::Mutex<()>> {
        let mut locks = self.inner.write_locks.lock();
        Arc::clone(locks.entry(key.to_owned()).or_default())
    }

    fn release_write_lock(&self, key: &str) {
        let mut locks = self.inner.write_locks.lock();
        if locks.get(key).is_some_and(|lock| Arc::strong_count(lock) == 1) {
            locks.remove(key);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hearth_storage::MemoryStore;

    #[tokio::test]
    async fn test_write_locks_are_released() {
        let vault = Vault::builder().store(MemoryStore::new()).build().unwrap();

        vault.set("a", &1).await;
        vault.remove("a").await;

        assert!(vault.inner.write_locks.lock().is_empty());
    }

    #[tokio::test]
    async fn test_unserializable_value_fails() {
        use std::collections::BTreeMap;
        let vault = Vault::builder().store(MemoryStore::new()).build().unwrap();

        let mut map = BTreeMap::new();
        map.insert((1, 2), "tuple keys are not JSON object keys");

        assert_eq!(vault.set("bad", &map).await, WriteOutcome::Failed);
        assert_eq!(vault.get::<String>("bad").await, None);
    }
}
