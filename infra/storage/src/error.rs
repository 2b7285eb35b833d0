use std::borrow::Cow;

/// A specialized [`StorageError`] enum of this crate.
#[hearth_derive::hearth_error]
pub enum StorageError {
    /// The key is empty, too long, or contains characters outside the allowed set.
    #[error("Invalid store key{}: {message}", format_context(.context))]
    InvalidKey { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// The store refuses writes (quota exceeded, storage disabled, read-only profile).
    #[error("Store unavailable{}: {message}", format_context(.context))]
    Unavailable { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Hardware I/O failure{}: {source}", format_context(.context))]
    Io { source: std::io::Error, context: Option<Cow<'static, str>> },

    /// Stored bytes are not valid UTF-8 and cannot be returned as a string value.
    #[error("Corrupted entry{}: {source}", format_context(.context))]
    Encoding { source: std::string::FromUtf8Error, context: Option<Cow<'static, str>> },

    #[error("Internal storage error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
