//! # Vault Errors
//!
//! [`VaultError`] covers the crypto path only. The public store operations are total and
//! convert these errors into degraded outcomes and log events; callers never see them
//! unless they use the `*_checked` variants or the key manager directly.

use std::borrow::Cow;

#[hearth_derive::hearth_error]
pub enum VaultError {
    /// The host cryptography primitives are missing or refused to operate.
    #[error("Crypto unavailable{}: {message}", format_context(.context))]
    CryptoUnavailable { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// Failure during the encryption process.
    #[error("Encryption error{}: {message}", format_context(.context))]
    Encryption { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// Failure during the decryption process.
    ///
    /// Usually a different master key, a value moved to another entry key, or tampered data.
    #[error("Decryption error{}: {message}", format_context(.context))]
    Decryption { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// The stored value is not a well-formed packed payload.
    #[error("Invalid payload{}: {message}", format_context(.context))]
    InvalidPayload { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// Base64 decoding failure for a key or payload segment.
    #[error("Encoding error{}: {source}", format_context(.context))]
    Encoding { source: base64::DecodeError, context: Option<Cow<'static, str>> },

    /// JSON (de)serialization failure.
    #[error("Serialization error{}: {source}", format_context(.context))]
    Serialization { source: serde_json::Error, context: Option<Cow<'static, str>> },

    /// The host store rejected a read or write.
    #[error("Host store error{}: {source}", format_context(.context))]
    Storage { source: hearth_storage::StorageError, context: Option<Cow<'static, str>> },

    /// The vault was built with invalid settings.
    #[error("Invalid configuration{}: {message}", format_context(.context))]
    InvalidConfiguration { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Internal vault error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
