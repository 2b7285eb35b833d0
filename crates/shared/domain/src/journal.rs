//! Craving/event journal entries.

use crate::error::DomainError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Ordinal craving/urge intensity, `1..=5`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Intensity(u8);

impl Intensity {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Intensity {
    type Error = DomainError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(DomainError::InvalidIntensity {
                message: format!("{value} is outside {}..={}", Self::MIN, Self::MAX).into(),
                context: None,
            })
        }
    }
}

impl From<Intensity> for u8 {
    fn from(value: Intensity) -> Self {
        value.0
    }
}

impl fmt::Display for Intensity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.0, Self::MAX)
    }
}

/// What the user enters; id and timestamp are assigned on append.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogDraft<I> {
    pub category: I,
    pub intensity: Intensity,
    #[serde(default)]
    pub slip: Option<bool>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl<I> LogDraft<I> {
    #[must_use]
    pub const fn new(category: I, intensity: Intensity) -> Self {
        Self { category, intensity, slip: None, notes: None }
    }

    #[must_use]
    pub const fn slip(mut self, slip: bool) -> Self {
        self.slip = Some(slip);
        self
    }

    #[must_use]
    pub fn notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}

/// An immutable journal entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry<I> {
    pub id: String,
    pub at: DateTime<Utc>,
    pub category: I,
    pub intensity: Intensity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slip: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl<I> LogEntry<I> {
    #[must_use]
    pub fn from_draft(id: String, at: DateTime<Utc>, draft: LogDraft<I>) -> Self {
        Self {
            id,
            at,
            category: draft.category,
            intensity: draft.intensity,
            slip: draft.slip,
            notes: draft.notes,
        }
    }

    #[must_use]
    pub fn slipped(&self) -> bool {
        self.slip.unwrap_or(false)
    }
}
