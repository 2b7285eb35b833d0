//! Cryptographic primitives behind the vault.
//!
//! The vault never calls a cipher directly; it goes through [`CryptoProvider`] so that a
//! host without working primitives can be modelled ([`UnavailableCrypto`]) and the
//! plaintext fallback path exercised.

use crate::error::VaultError;
use crate::keys::MasterKey;
use crate::types::{IV_LEN, TAG_LEN};
use aead::inout::InOutBuf;
use aead::{AeadInOut, Key, KeyInit, Nonce, Tag};
use aes_gcm::Aes256Gcm;
use std::fmt::Debug;

/// Host cryptography: a CSPRNG plus an AEAD cipher keyed by the master key.
pub trait CryptoProvider: Send + Sync + Debug {
    /// Fills `buf` with cryptographically secure random bytes.
    ///
    /// # Errors
    /// Returns [`VaultError::CryptoUnavailable`] if the system RNG cannot be used.
    fn fill_random(&self, buf: &mut [u8]) -> Result<(), VaultError>;

    /// Encrypts `plaintext`, returning `ciphertext || tag`.
    ///
    /// # Errors
    /// Returns [`VaultError::Encryption`] or [`VaultError::CryptoUnavailable`].
    fn encrypt(
        &self,
        key: &MasterKey,
        iv: &[u8; IV_LEN],
        aad: &[u8],
        plaintext: &[u8],
    ) -> Result<Vec<u8>, VaultError>;

    /// Authenticates and decrypts `ciphertext || tag`.
    ///
    /// # Errors
    /// Returns [`VaultError::Decryption`] when authentication fails, which covers a wrong
    /// key, a wrong `aad`, and tampered bytes alike.
    fn decrypt(
        &self,
        key: &MasterKey,
        iv: &[u8; IV_LEN],
        aad: &[u8],
        sealed: &[u8],
    ) -> Result<Vec<u8>, VaultError>;
}

/// AES-256-GCM with a 96-bit IV and a 128-bit tag, randomness from the OS.
#[derive(Debug, Default, Clone, Copy)]
pub struct AesGcmCrypto;

impl AesGcmCrypto {
    fn cipher(key: &MasterKey) -> Result<Aes256Gcm, VaultError> {
        let key = Key::<Aes256Gcm>::try_from(key.as_bytes().as_slice()).map_err(|_| {
            VaultError::InvalidConfiguration {
                message: "Invalid key length, must be 32 bytes".into(),
                context: Some("AES-256-GCM".into()),
            }
        })?;
        Ok(Aes256Gcm::new(&key))
    }

    fn nonce(iv: &[u8; IV_LEN]) -> Result<Nonce<Aes256Gcm>, VaultError> {
        iv.as_slice().try_into().map_err(|_| VaultError::InvalidPayload {
            message: "Invalid IV length".into(),
            context: None,
        })
    }
}

impl CryptoProvider for AesGcmCrypto {
    fn fill_random(&self, buf: &mut [u8]) -> Result<(), VaultError> {
        getrandom::fill(buf).map_err(|e| VaultError::CryptoUnavailable {
            message: format!("System RNG unavailable: {e}").into(),
            context: None,
        })
    }

    fn encrypt(
        &self,
        key: &MasterKey,
        iv: &[u8; IV_LEN],
        aad: &[u8],
        plaintext: &[u8],
    ) -> Result<Vec<u8>, VaultError> {
        let cipher = Self::cipher(key)?;
        let nonce = Self::nonce(iv)?;

        let mut buf = Vec::with_capacity(plaintext.len() + TAG_LEN);
        buf.extend_from_slice(plaintext);

        let tag = cipher
            .encrypt_inout_detached(&nonce, aad, InOutBuf::from(buf.as_mut_slice()))
            .map_err(|_| VaultError::Encryption {
                message: "Encryption failed".into(),
                context: Some("AEAD encryption failed".into()),
            })?;

        buf.extend_from_slice(tag.as_slice());
        Ok(buf)
    }

    fn decrypt(
        &self,
        key: &MasterKey,
        iv: &[u8; IV_LEN],
        aad: &[u8],
        sealed: &[u8],
    ) -> Result<Vec<u8>, VaultError> {
        if sealed.len() < TAG_LEN {
            return Err(VaultError::InvalidPayload {
                message: format!(
                    "Payload too short ({} bytes). Expected at least {TAG_LEN} bytes",
                    sealed.len()
                )
                .into(),
                context: None,
            });
        }

        let cipher = Self::cipher(key)?;
        let nonce = Self::nonce(iv)?;

        let (ciphertext, tag_slice) = sealed.split_at(sealed.len() - TAG_LEN);
        let tag: Tag<Aes256Gcm> = tag_slice.try_into().map_err(|_| VaultError::Decryption {
            message: "Invalid tag length".into(),
            context: None,
        })?;

        let mut buf = ciphertext.to_vec();
        cipher.decrypt_inout_detached(&nonce, aad, InOutBuf::from(buf.as_mut_slice()), &tag).map_err(
            |_| VaultError::Decryption {
                message: "Decryption failed".into(),
                context: Some("AEAD authentication failed".into()),
            },
        )?;

        Ok(buf)
    }
}

/// A host with no usable cryptography. Every call fails with
/// [`VaultError::CryptoUnavailable`].
#[derive(Debug, Default, Clone, Copy)]
pub struct UnavailableCrypto;

impl UnavailableCrypto {
    fn refuse() -> VaultError {
        VaultError::CryptoUnavailable {
            message: "No cryptographic primitives on this host".into(),
            context: None,
        }
    }
}

impl CryptoProvider for UnavailableCrypto {
    fn fill_random(&self, _buf: &mut [u8]) -> Result<(), VaultError> {
        Err(Self::refuse())
    }

    fn encrypt(
        &self,
        _key: &MasterKey,
        _iv: &[u8; IV_LEN],
        _aad: &[u8],
        _plaintext: &[u8],
    ) -> Result<Vec<u8>, VaultError> {
        Err(Self::refuse())
    }

    fn decrypt(
        &self,
        _key: &MasterKey,
        _iv: &[u8; IV_LEN],
        _aad: &[u8],
        _sealed: &[u8],
    ) -> Result<Vec<u8>, VaultError> {
        Err(Self::refuse())
    }
}
