use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};

/// Suffix of the vault entry holding a module's consent flag.
pub const CONSENT_SUFFIX: &str = "consent";

/// Suffix of the vault entry holding a module's records and journal.
pub const DATA_SUFFIX: &str = "data";

/// A tracked module. Each owns one consent entry and one data entry in the vault.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    IntoStaticStr,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum ModuleId {
    SexualHealth,
    Recovery,
}

impl ModuleId {
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::SexualHealth => "Sexual Health",
            Self::Recovery => "Recovery",
        }
    }

    /// Vault key of the consent flag, e.g. `recovery.consent`.
    #[must_use]
    pub fn consent_key(self) -> String {
        format!("{self}.{CONSENT_SUFFIX}")
    }

    /// Vault key of the records and journal snapshot, e.g. `recovery.data`.
    #[must_use]
    pub fn data_key(self) -> String {
        format!("{self}.{DATA_SUFFIX}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_storage_keys() {
        assert_eq!(ModuleId::SexualHealth.consent_key(), "sexual-health.consent");
        assert_eq!(ModuleId::Recovery.data_key(), "recovery.data");
    }

    #[test]
    fn test_textual_ids() {
        assert_eq!(ModuleId::from_str("sexual-health").unwrap(), ModuleId::SexualHealth);
        assert!(ModuleId::from_str("chat").is_err());
        assert_eq!(serde_json::to_string(&ModuleId::Recovery).unwrap(), "\"recovery\"");
    }
}
