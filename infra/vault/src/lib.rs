//! # Vault
//!
//! At-rest encryption for the hearth data vault.
//!
//! Values are serialized to JSON and encrypted with AES-256-GCM under a single master key
//! that lives in the same host store as the data. The key is generated on the first
//! encrypted write and reused afterwards; reads never create it.
//!
//! ## Stored forms
//!
//! - **Packed**: `base64(iv) ":" base64(ciphertext || tag)`, with a fresh 12-byte IV per
//!   write and the entry key as associated data, so a value copied to another key does
//!   not decrypt.
//! - **Plaintext**: bare JSON, written when the crypto path fails and accepted on read for
//!   data from before encryption existed.
//!
//! ## Degradation
//!
//! [`Vault::set`] tries the encrypted path, then plaintext, and reports which one stuck as a
//! [`WriteOutcome`]. [`Vault::get`] returns `None` instead of failing. Nothing here panics
//! on host misbehaviour.
//!
//! ## Limitations
//!
//! The master key sits next to the data it protects. This defends against casual
//! inspection of the store, not against an attacker with full access to it.

mod builder;
mod crypto;
mod store;
mod error;
mod keys;
mod types;

pub use builder::{NoStore, VaultBuilder, WithStore};
pub use crypto::{AesGcmCrypto, CryptoProvider, UnavailableCrypto};
pub use store::Vault;
pub use error::{VaultError, VaultErrorExt};
pub use keys::{DEFAULT_KEY_ID, KeyManager, MasterKey};
pub use types::{IV_LEN, KEY_LEN, PACKED_DELIMITER, PackedValue, TAG_LEN, WriteOutcome, is_packed};

pub mod prelude {
    pub use crate::{AesGcmCrypto, Vault, VaultError, WriteOutcome};
}
