//! # Red Flags
//!
//! Maps enumerated self-report answers to fixed warning indicators. Every `(domain, issue)`
//! pair owns a static table of independent [`Rule`]s; an indicator is emitted for each rule
//! whose predicate holds. There is no scoring: the result is triggered as soon as one rule
//! fires. Unanswered fields never fire and free-text notes are never inspected.
//!
//! Evaluation is pure and total. It reads only the in-memory record, never storage.
//!
//! ```rust
//! use hearth_domain::sexual_health::{Duration, Frequency, SexualHealthResponse, SexualIssue};
//! use hearth_domain::SexualHealth;
//! use hearth_redflags::evaluate;
//!
//! let record = SexualHealthResponse {
//!     frequency: Some(Frequency::Often),
//!     duration: Some(Duration::ThreePlusMonths),
//!     ..Default::default()
//! };
//!
//! let result = evaluate::<SexualHealth>(SexualIssue::ErectileDysfunction, &record);
//! assert!(result.triggered);
//! assert_eq!(result.codes(), ["frequency", "duration"]);
//! ```

mod rule;
mod tables;

pub use rule::{Indicator, RedFlagResult, Rule, RuleSet};

use hearth_domain::{Domain, IssueId};
use strum::IntoEnumIterator;
use tracing::trace;

/// Evaluates `record` against the rule table of `issue`.
#[must_use]
pub fn evaluate<D: RuleSet>(issue: D::Issue, record: &D::Response) -> RedFlagResult {
    let indicators: Vec<Indicator> = D::rules_for(issue)
        .iter()
        .filter(|rule| rule.applies(record))
        .map(Rule::indicator)
        .collect();

    trace!(module = %D::MODULE, %issue, fired = indicators.len(), "Evaluated red flag rules");
    RedFlagResult::from_indicators(indicators)
}

/// Like [`evaluate`], for a textual issue id. Unknown ids yield the empty result.
#[must_use]
pub fn evaluate_raw<D: RuleSet>(issue_id: &str, record: &D::Response) -> RedFlagResult {
    <D as Domain>::Issue::parse(issue_id)
        .map_or_else(RedFlagResult::default, |issue| evaluate::<D>(issue, record))
}

/// The rule table of `issue`, for auditing and display.
#[must_use]
pub fn rules_for<D: RuleSet>(issue: D::Issue) -> &'static [Rule<D::Response>] {
    D::rules_for(issue)
}

/// Every issue of `D` with its rule table, in issue order.
#[must_use]
pub fn audit<D: RuleSet>() -> Vec<(D::Issue, &'static [Rule<D::Response>])> {
    <D as Domain>::Issue::iter().map(|issue| (issue, D::rules_for(issue))).collect()
}
