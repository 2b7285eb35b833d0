use crate::error::StorageError;
use std::fmt;

/// Longest key accepted by any store; keeps file names well under platform limits.
pub const MAX_KEY_LEN: usize = 128;

/// A validated store key.
///
/// Keys are lowercase ASCII alphanumerics plus `.`, `_` and `-`, must not start with `.`
/// and must not contain `..`. This keeps every key a single, non-hidden file name inside
/// the file store sandbox.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StoreKey(String);

impl StoreKey {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<&str> for StoreKey {
    type Error = StorageError;

    fn try_from(value: &str) -> Result<Self, StorageError> {
        if value.is_empty() {
            return Err(StorageError::InvalidKey {
                message: "EMPTY".into(),
                context: Some("Store key cannot be empty".into()),
            });
        }

        if value.len() > MAX_KEY_LEN {
            return Err(StorageError::InvalidKey {
                message: format!("{} bytes", value.len()).into(),
                context: Some(format!("Store key longer than {MAX_KEY_LEN} bytes").into()),
            });
        }

        if value.starts_with('.') || value.contains("..") {
            return Err(StorageError::InvalidKey {
                message: value.to_owned().into(),
                context: Some("Store key cannot be hidden or contain '..'".into()),
            });
        }

        let allowed = |c: char| {
            c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '.' | '_' | '-')
        };
        if !value.chars().all(allowed) {
            return Err(StorageError::InvalidKey {
                message: value.to_owned().into(),
                context: Some("Store key contains illegal characters".into()),
            });
        }

        Ok(Self(value.to_owned()))
    }
}

impl TryFrom<String> for StoreKey {
    type Error = StorageError;

    fn try_from(value: String) -> Result<Self, StorageError> {
        Self::try_from(value.as_str())
    }
}

impl AsRef<str> for StoreKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StoreKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_module_keys() {
        for key in ["hearth.master-key", "recovery.data", "sexual-health.consent", "a_1"] {
            assert!(StoreKey::try_from(key).is_ok(), "{key} should be valid");
        }
    }

    #[test]
    fn rejects_traversal_and_garbage() {
        for key in ["", ".hidden", "a..b", "../etc", "with/slash", "Upper", "sp ace"] {
            assert!(
                matches!(StoreKey::try_from(key), Err(StorageError::InvalidKey { .. })),
                "{key:?} should be rejected"
            );
        }
    }

    #[test]
    fn rejects_overlong_keys() {
        let key = "k".repeat(MAX_KEY_LEN + 1);
        assert!(StoreKey::try_from(key).is_err());
    }
}
