use crate::crypto::{AesGcmCrypto, CryptoProvider};
use crate::store::{Vault, VaultInner};
use crate::error::VaultError;
use crate::keys::{DEFAULT_KEY_ID, KeyManager};
use hearth_storage::{HostStore, StoreKey};
use parking_lot::Mutex;
use private::Sealed;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

#[derive(Debug, Default)]
pub struct NoStore;

pub struct WithStore(Arc<dyn HostStore>);

impl fmt::Debug for WithStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("WithStore").field(&self.0).finish()
    }
}

mod private {
    pub(super) trait Sealed {}
}
impl Sealed for NoStore {}
impl Sealed for WithStore {}

/// Configures a [`Vault`]. A host store is required; the crypto provider defaults to
/// [`AesGcmCrypto`] and the key entry to [`DEFAULT_KEY_ID`].
#[allow(private_bounds)]
#[derive(Debug)]
pub struct VaultBuilder<S: Sealed = NoStore> {
    store: S,
    crypto: Arc<dyn CryptoProvider>,
    key_id: String,
}

impl Default for VaultBuilder<NoStore> {
    fn default() -> Self {
        Self { store: NoStore, crypto: Arc::new(AesGcmCrypto), key_id: DEFAULT_KEY_ID.to_owned() }
    }
}

impl VaultBuilder<NoStore> {
    #[must_use = "Builder must be given a store before use"]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn store(self, store: impl HostStore + 'static) -> VaultBuilder<WithStore> {
        self.shared_store(Arc::new(store))
    }

    /// Uses an already shared store, e.g. one the caller also reads directly.
    #[must_use]
    pub fn shared_store(self, store: Arc<dyn HostStore>) -> VaultBuilder<WithStore> {
        VaultBuilder { store: WithStore(store), crypto: self.crypto, key_id: self.key_id }
    }
}

#[allow(private_bounds)]
impl<S: Sealed> VaultBuilder<S> {
    #[must_use]
    pub fn crypto(mut self, crypto: impl CryptoProvider + 'static) -> Self {
        self.crypto = Arc::new(crypto);
        self
    }

    /// Overrides the host-store entry that holds the master key.
    #[must_use]
    pub fn key_id(mut self, key_id: impl Into<String>) -> Self {
        self.key_id = key_id.into();
        self
    }
}

impl VaultBuilder<WithStore> {
    /// Finalizes construction. No I/O happens here; the master key is created lazily.
    ///
    /// # Errors
    /// Returns [`VaultError::InvalidConfiguration`] if the key id is not a valid store key.
    pub fn build(self) -> Result<Vault, VaultError> {
        StoreKey::try_from(self.key_id.as_str()).map_err(|e| VaultError::InvalidConfiguration {
            message: format!("Invalid master key id '{}': {e}", self.key_id).into(),
            context: None,
        })?;

        let store = self.store.0;
        let keys = KeyManager::new(Arc::clone(&store), Arc::clone(&self.crypto), self.key_id);

        Ok(Vault {
            inner: Arc::new(VaultInner {
                store,
                crypto: self.crypto,
                keys,
                write_locks: Mutex::new(HashMap::new()),
            }),
        })
    }
}
