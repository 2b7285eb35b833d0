use crate::error::{VaultError, VaultErrorExt};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

/// Master key length (256-bit).
pub const KEY_LEN: usize = 32;

/// AES-GCM initialization vector length (96-bit).
pub const IV_LEN: usize = 12;

/// AES-GCM authentication tag length (128-bit), appended to the ciphertext.
pub const TAG_LEN: usize = 16;

/// Separates the IV segment from the ciphertext segment in a packed value.
pub const PACKED_DELIMITER: char = ':';

/// Length of a standard, padded base64 encoding of an [`IV_LEN`]-byte IV.
const IV_B64_LEN: usize = IV_LEN.div_ceil(3) * 4;

/// The encrypted form of a vault entry.
///
/// Packed into a single string as:
///
/// ```text
/// base64(iv) ":" base64(ciphertext || tag)
/// ```
///
/// Neither segment can contain the delimiter, and no JSON document has the shape
/// `<base64>:<base64>`, so the packed form and legacy plaintext JSON are told apart by
/// shape alone. See [`PackedValue::is_packed`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackedValue {
    pub iv: [u8; IV_LEN],
    pub ciphertext: Vec<u8>,
}

impl PackedValue {
    #[must_use]
    pub fn encode(&self) -> String {
        let mut out = String::with_capacity(IV_B64_LEN + 1 + self.ciphertext.len().div_ceil(3) * 4);
        STANDARD.encode_string(self.iv, &mut out);
        out.push(PACKED_DELIMITER);
        STANDARD.encode_string(&self.ciphertext, &mut out);
        out
    }

    /// Parses a packed string.
    ///
    /// # Errors
    /// * [`VaultError::InvalidPayload`] if the delimiter is missing, the IV has the wrong
    ///   length, or the ciphertext is shorter than an authentication tag.
    /// * [`VaultError::Encoding`] if a segment is not valid base64.
    pub fn decode(raw: &str) -> Result<Self, VaultError> {
        let (iv_b64, ct_b64) =
            raw.split_once(PACKED_DELIMITER).ok_or_else(|| VaultError::InvalidPayload {
                message: "Missing IV delimiter".into(),
                context: None,
            })?;

        let iv_bytes = STANDARD.decode(iv_b64).context("IV segment")?;
        let iv: [u8; IV_LEN] =
            iv_bytes.as_slice().try_into().map_err(|_| VaultError::InvalidPayload {
                message: format!("IV is {} bytes, expected {IV_LEN}", iv_bytes.len()).into(),
                context: None,
            })?;

        let ciphertext = STANDARD.decode(ct_b64).context("Ciphertext segment")?;
        if ciphertext.len() < TAG_LEN {
            return Err(VaultError::InvalidPayload {
                message: format!(
                    "Ciphertext too short ({} bytes). Expected at least {TAG_LEN} bytes",
                    ciphertext.len()
                )
                .into(),
                context: None,
            });
        }

        Ok(Self { iv, ciphertext })
    }

    /// Returns `true` if `raw` has the packed shape: one delimiter between two non-empty
    /// base64 segments, the first decoding to exactly [`IV_LEN`] bytes.
    #[must_use]
    pub fn is_packed(raw: &str) -> bool {
        let Some((iv, ct)) = raw.split_once(PACKED_DELIMITER) else {
            return false;
        };
        iv.len() == IV_B64_LEN
            && is_base64_segment(iv)
            && is_base64_segment(ct)
            && STANDARD.decode(iv).is_ok_and(|bytes| bytes.len() == IV_LEN)
    }
}

/// Shorthand for [`PackedValue::is_packed`].
#[must_use]
pub fn is_packed(raw: &str) -> bool {
    PackedValue::is_packed(raw)
}

fn is_base64_segment(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_alphanumeric() || matches!(b, b'+' | b'/' | b'='))
}

/// How a [`crate::Vault::set`] call ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WriteOutcome {
    /// The value was encrypted and stored in packed form.
    Encrypted,
    /// The crypto path failed; the value was stored as plaintext JSON.
    Plaintext,
    /// Nothing was stored: the value could not be serialized or the host store refused
    /// the plaintext fallback too.
    Failed,
}

impl WriteOutcome {
    /// `true` when the value is now in the host store, in either form.
    #[must_use]
    pub const fn is_persisted(self) -> bool {
        matches!(self, Self::Encrypted | Self::Plaintext)
    }

    /// `true` when the value was persisted without encryption.
    #[must_use]
    pub const fn is_degraded(self) -> bool {
        matches!(self, Self::Plaintext)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> PackedValue {
        PackedValue { iv: [7u8; IV_LEN], ciphertext: vec![1u8; TAG_LEN + 5] }
    }

    #[test]
    fn test_packed_shape_is_detected() {
        let packed = sample().encode();
        assert!(PackedValue::is_packed(&packed));
        assert_eq!(PackedValue::decode(&packed).unwrap(), sample());
    }

    #[test]
    fn test_json_is_never_packed() {
        for raw in [
            "true",
            "null",
            "42",
            "\"AAAAAAAAAAAAAAAA:AAAA\"",
            "{\"a\":1}",
            "{\"iv\":\"x\",\"data\":\"y\"}",
            "[\"a:b\"]",
        ] {
            assert!(!PackedValue::is_packed(raw), "{raw} must not look packed");
        }
    }

    #[test]
    fn test_wrong_iv_length_is_not_packed() {
        assert!(!PackedValue::is_packed("AAAA:AAAAAAAAAAAAAAAAAAAAAAAA"));
        assert!(!PackedValue::is_packed("AAAAAAAAAAAAAAAA:"));
    }

    #[test]
    fn test_short_ciphertext_is_rejected() {
        let packed = PackedValue { iv: [0u8; IV_LEN], ciphertext: vec![0u8; 4] }.encode();
        assert!(matches!(PackedValue::decode(&packed), Err(VaultError::InvalidPayload { .. })));
    }

    #[test]
    fn test_outcome_flags() {
        assert!(WriteOutcome::Encrypted.is_persisted());
        assert!(!WriteOutcome::Encrypted.is_degraded());
        assert!(WriteOutcome::Plaintext.is_persisted());
        assert!(WriteOutcome::Plaintext.is_degraded());
        assert!(!WriteOutcome::Failed.is_persisted());
    }
}
