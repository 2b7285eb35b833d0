use crate::crypto::CryptoProvider;
use crate::error::{VaultError, VaultErrorExt};
use crate::types::KEY_LEN;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use hearth_storage::HostStore;
use std::fmt;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Default host-store entry holding the encoded master key.
pub const DEFAULT_KEY_ID: &str = "hearth.master-key";

/// A 256-bit symmetric master key. Zeroed on drop, never printed.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct MasterKey([u8; KEY_LEN]);

impl MasterKey {
    #[must_use]
    pub const fn from_bytes(bytes: [u8; KEY_LEN]) -> Self {
        Self(bytes)
    }

    /// Draws a fresh key from the provider's CSPRNG.
    ///
    /// # Errors
    /// Returns [`VaultError::CryptoUnavailable`] if no randomness is available.
    pub fn generate(crypto: &dyn CryptoProvider) -> Result<Self, VaultError> {
        let mut bytes = [0u8; KEY_LEN];
        crypto.fill_random(&mut bytes)?;
        let key = Self(bytes);
        bytes.zeroize();
        Ok(key)
    }

    /// Decodes the stored form (standard base64 of the raw key bytes).
    ///
    /// # Errors
    /// * [`VaultError::Encoding`] if `encoded` is not base64.
    /// * [`VaultError::InvalidPayload`] if it does not decode to exactly 32 bytes.
    pub fn decode(encoded: &str) -> Result<Self, VaultError> {
        let mut raw = STANDARD.decode(encoded.trim()).context("Master key")?;
        let result = <[u8; KEY_LEN]>::try_from(raw.as_slice()).map(Self).map_err(|_| {
            VaultError::InvalidPayload {
                message: format!("Master key is {} bytes, expected {KEY_LEN}", raw.len()).into(),
                context: None,
            }
        });
        raw.zeroize();
        result
    }

    #[must_use]
    pub fn encode(&self) -> String {
        STANDARD.encode(self.0)
    }

    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.0
    }
}

impl fmt::Debug for MasterKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("MasterKey(<redacted>)")
    }
}

/// Owns the single master key entry in the host store.
///
/// The key is created lazily on the first encrypted write and reused for every later
/// write and read. Creation is serialized so concurrent first writes agree on one key.
#[derive(Debug)]
pub struct KeyManager {
    store: Arc<dyn HostStore>,
    crypto: Arc<dyn CryptoProvider>,
    key_id: String,
    create_lock: Mutex<()>,
}

impl KeyManager {
    #[must_use]
    pub fn new(
        store: Arc<dyn HostStore>,
        crypto: Arc<dyn CryptoProvider>,
        key_id: impl Into<String>,
    ) -> Self {
        Self { store, crypto, key_id: key_id.into(), create_lock: Mutex::new(()) }
    }

    #[must_use]
    pub fn key_id(&self) -> &str {
        &self.key_id
    }

    /// Reads the persisted key without creating one.
    ///
    /// A stored value that is not a valid 32-byte key is reported as absent.
    ///
    /// # Errors
    /// Returns [`VaultError::Storage`] if the host store cannot be read.
    pub fn load_key(&self) -> Result<Option<MasterKey>, VaultError> {
        let Some(encoded) = self.store.get(&self.key_id).context("Reading master key")? else {
            return Ok(None);
        };

        match MasterKey::decode(&encoded) {
            Ok(key) => Ok(Some(key)),
            Err(e) => {
                warn!(key_id = %self.key_id, error = %e, "Stored master key is unusable");
                Ok(None)
            },
        }
    }

    /// Returns the persisted key, generating and persisting a new one if none exists.
    ///
    /// # Errors
    /// * [`VaultError::Storage`] if the store cannot be read or the new key cannot be written.
    /// * [`VaultError::CryptoUnavailable`] if no randomness is available.
    pub async fn get_or_create_key(&self) -> Result<MasterKey, VaultError> {
        if let Some(key) = self.load_key()? {
            return Ok(key);
        }

        let _guard = self.create_lock.lock().await;

        // Another writer may have created it while we waited.
        if let Some(key) = self.load_key()? {
            debug!(key_id = %self.key_id, "Master key created concurrently");
            return Ok(key);
        }

        let key = MasterKey::generate(self.crypto.as_ref())?;
        let mut encoded = key.encode();
        let written = self.store.set(&self.key_id, &encoded).context("Persisting master key");
        encoded.zeroize();
        written?;

        info!(key_id = %self.key_id, "Generated new master key");
        Ok(key)
    }

    /// Deletes the persisted key. Values encrypted under it become unreadable.
    ///
    /// # Errors
    /// Returns [`VaultError::Storage`] if the host store rejects the removal.
    pub fn forget(&self) -> Result<(), VaultError> {
        self.store.remove(&self.key_id).context("Removing master key")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::{AesGcmCrypto, UnavailableCrypto};
    use hearth_storage::MemoryStore;

    fn manager(store: &MemoryStore) -> KeyManager {
        KeyManager::new(Arc::new(store.clone()), Arc::new(AesGcmCrypto), DEFAULT_KEY_ID)
    }

    #[test]
    fn test_debug_is_redacted() {
        let key = MasterKey::from_bytes([0xAB; KEY_LEN]);
        let printed = format!("{key:?}");
        assert!(!printed.contains("171"));
        assert!(printed.contains("redacted"));
    }

    #[test]
    fn test_encode_decode() {
        let key = MasterKey::from_bytes([5; KEY_LEN]);
        assert_eq!(MasterKey::decode(&key.encode()).unwrap().as_bytes(), key.as_bytes());
        assert!(MasterKey::decode("c2hvcnQ=").is_err());
        assert!(MasterKey::decode("not base64!").is_err());
    }

    #[tokio::test]
    async fn test_key_is_created_once_and_reused() {
        let store = MemoryStore::new();
        let keys = manager(&store);

        assert!(keys.load_key().unwrap().is_none());
        let first = keys.get_or_create_key().await.unwrap();
        let second = keys.get_or_create_key().await.unwrap();

        assert_eq!(first.as_bytes(), second.as_bytes());
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_corrupt_key_is_replaced() {
        let store = MemoryStore::new();
        store.set(DEFAULT_KEY_ID, "AAAA").unwrap();
        let keys = manager(&store);

        assert!(keys.load_key().unwrap().is_none());
        let key = keys.get_or_create_key().await.unwrap();
        assert_eq!(store.get(DEFAULT_KEY_ID).unwrap(), Some(key.encode()));
    }

    #[tokio::test]
    async fn test_creation_without_rng_fails_and_stores_nothing() {
        let store = MemoryStore::new();
        let keys = KeyManager::new(Arc::new(store.clone()), Arc::new(UnavailableCrypto), DEFAULT_KEY_ID);

        assert!(matches!(keys.get_or_create_key().await, Err(VaultError::CryptoUnavailable { .. })));
        assert_eq!(store.len(), 0);
    }
}
