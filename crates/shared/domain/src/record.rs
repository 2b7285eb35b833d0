//! Shared shape of a tracked domain: a closed set of issue ids, one response record per
//! issue, and the module the records belong to.

use crate::module::ModuleId;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::collections::BTreeMap;
use std::fmt::{Debug, Display};
use std::hash::Hash;
use std::str::FromStr;
use strum::IntoEnumIterator;

/// Declares a closed choice enum whose serde and strum forms are the kebab-case id.
/// A variant can override its id with `= "literal"`.
macro_rules! choice {
    ($(#[$meta:meta])* $name:ident { $($variant:ident $(= $rename:literal)?),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            Hash,
            PartialOrd,
            Ord,
            ::serde::Serialize,
            ::serde::Deserialize,
            ::strum_macros::Display,
            ::strum_macros::EnumString,
            ::strum_macros::EnumIter,
            ::strum_macros::IntoStaticStr,
        )]
        #[serde(rename_all = "kebab-case")]
        #[strum(serialize_all = "kebab-case")]
        pub enum $name {
            $(
                $(#[serde(rename = $rename)] #[strum(serialize = $rename)])?
                $variant,
            )+
        }
    };
}
pub(crate) use choice;

/// A closed, ordered set of issue (or category) identifiers.
///
/// `Display`/`FromStr` and serde all use the kebab-case id, e.g. `low-libido`.
pub trait IssueId:
    Copy
    + Eq
    + Ord
    + Hash
    + Debug
    + Display
    + FromStr
    + IntoEnumIterator
    + Serialize
    + DeserializeOwned
    + Send
    + Sync
    + 'static
{
    /// Human-readable name used in exports.
    fn title(self) -> &'static str;

    /// Parses a textual id; unknown ids are `None`.
    #[must_use]
    fn parse(raw: &str) -> Option<Self> {
        raw.trim().parse().ok()
    }
}

/// One answered field of a response record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Answer {
    /// Snake-case field name, e.g. `relationship_impact`.
    pub field: &'static str,
    /// Human-readable label, e.g. `Relationship impact`.
    pub label: &'static str,
    /// Kebab-case enumerated value, e.g. `three-plus-months`.
    pub value: &'static str,
}

/// A self-report record: closed enumerated fields plus free-text notes.
pub trait ResponseRecord:
    Debug + Clone + Default + PartialEq + Serialize + DeserializeOwned + Send + Sync + 'static
{
    /// The answered enumerated fields, in form order. Unanswered fields are omitted.
    fn answers(&self) -> Vec<Answer>;

    fn notes(&self) -> Option<&str>;

    fn is_empty(&self) -> bool {
        self.answers().is_empty() && self.notes().is_none_or(|n| n.trim().is_empty())
    }
}

/// Records of a domain, one per issue, in issue order.
pub type Records<D> = BTreeMap<<D as Domain>::Issue, <D as Domain>::Response>;

/// A tracked domain.
pub trait Domain: Debug + Send + Sync + 'static {
    type Issue: IssueId;
    type Response: ResponseRecord;

    const MODULE: ModuleId;

    /// Every issue present, every field empty.
    #[must_use]
    fn empty_records() -> Records<Self> {
        Self::Issue::iter().map(|issue| (issue, Self::Response::default())).collect()
    }
}

pub(crate) fn push_answer<T: Copy + Into<&'static str>>(
    out: &mut Vec<Answer>,
    field: &'static str,
    label: &'static str,
    value: Option<T>,
) {
    if let Some(value) = value {
        out.push(Answer { field, label, value: value.into() });
    }
}

pub(crate) fn non_blank(notes: Option<&String>) -> Option<&str> {
    notes.map(String::as_str).filter(|n| !n.trim().is_empty())
}
