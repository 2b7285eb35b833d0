use hearth_domain::Domain;
use serde::Serialize;
use std::fmt;

/// A fired warning: a stable short code and a fixed message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Indicator {
    pub code: &'static str,
    pub message: &'static str,
}

impl fmt::Display for Indicator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message)
    }
}

/// A single predicate over one response record.
pub struct Rule<R> {
    pub code: &'static str,
    pub message: &'static str,
    pub predicate: fn(&R) -> bool,
}

impl<R> Rule<R> {
    #[must_use]
    pub fn applies(&self, record: &R) -> bool {
        (self.predicate)(record)
    }

    #[must_use]
    pub const fn indicator(&self) -> Indicator {
        Indicator { code: self.code, message: self.message }
    }
}

impl<R> fmt::Debug for Rule<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule").field("code", &self.code).field("message", &self.message).finish()
    }
}

/// Transient evaluation result. Recomputed on demand and never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RedFlagResult {
    pub triggered: bool,
    pub indicators: Vec<Indicator>,
}

impl RedFlagResult {
    #[must_use]
    pub fn from_indicators(indicators: Vec<Indicator>) -> Self {
        Self { triggered: !indicators.is_empty(), indicators }
    }

    #[must_use]
    pub fn codes(&self) -> Vec<&'static str> {
        self.indicators.iter().map(|i| i.code).collect()
    }

    #[must_use]
    pub fn messages(&self) -> Vec<&'static str> {
        self.indicators.iter().map(|i| i.message).collect()
    }
}

/// A domain with a rule table per issue.
pub trait RuleSet: Domain {
    fn rules_for(issue: Self::Issue) -> &'static [Rule<Self::Response>];
}
