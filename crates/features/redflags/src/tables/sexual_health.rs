use crate::rule::{Rule, RuleSet};
use hearth_domain::sexual_health::{
    Distress, Duration, Frequency, Pain, RelationshipImpact, Severity, SexualHealthResponse,
    SexualIssue,
};
use hearth_domain::SexualHealth;

type R = SexualHealthResponse;

const FREQUENT: Rule<R> = Rule {
    code: "frequency",
    message: "Occurs most of the time or always",
    predicate: |r| matches!(r.frequency, Some(Frequency::Often | Frequency::Always)),
};

const PERSISTENT: Rule<R> = Rule {
    code: "duration",
    message: "Has persisted for more than three months",
    predicate: |r| matches!(r.duration, Some(Duration::ThreePlusMonths)),
};

const HIGH_DISTRESS: Rule<R> = Rule {
    code: "distress",
    message: "Causes high personal distress",
    predicate: |r| matches!(r.distress, Some(Distress::High)),
};

const RELATIONSHIP: Rule<R> = Rule {
    code: "relationship",
    message: "Significantly affects your relationship",
    predicate: |r| matches!(r.relationship_impact, Some(RelationshipImpact::Significant)),
};

static ERECTILE_DYSFUNCTION: [Rule<R>; 4] = [
    FREQUENT,
    PERSISTENT,
    Rule {
        code: "pain",
        message: "Pain may point to an underlying medical condition",
        predicate: |r| matches!(r.pain, Some(Pain::Moderate | Pain::Severe)),
    },
    HIGH_DISTRESS,
];

static PREMATURE_EJACULATION: [Rule<R>; 4] = [FREQUENT, PERSISTENT, HIGH_DISTRESS, RELATIONSHIP];

static DELAYED_EJACULATION: [Rule<R>; 3] = [FREQUENT, PERSISTENT, HIGH_DISTRESS];

static LOW_LIBIDO: [Rule<R>; 3] = [
    Rule {
        code: "duration",
        message: "Low desire has persisted for more than three months",
        predicate: |r| matches!(r.duration, Some(Duration::ThreePlusMonths)),
    },
    HIGH_DISTRESS,
    RELATIONSHIP,
];

static PAINFUL_INTERCOURSE: [Rule<R>; 3] = [
    Rule {
        code: "pain",
        message: "Moderate or severe pain during intercourse should be medically evaluated",
        predicate: |r| matches!(r.pain, Some(Pain::Moderate | Pain::Severe)),
    },
    Rule {
        code: "frequency",
        message: "Pain recurs regularly",
        predicate: |r| {
            matches!(r.frequency, Some(Frequency::Sometimes | Frequency::Often | Frequency::Always))
                && matches!(r.pain, Some(Pain::Mild | Pain::Moderate | Pain::Severe))
        },
    },
    Rule {
        code: "duration",
        message: "Pain has persisted for more than a month",
        predicate: |r| {
            matches!(r.duration, Some(Duration::OneToThreeMonths | Duration::ThreePlusMonths))
        },
    },
];

static COMPULSIVE_SEXUAL_BEHAVIOR: [Rule<R>; 4] = [
    Rule {
        code: "frequency",
        message: "Urges feel frequent and hard to control",
        predicate: |r| matches!(r.frequency, Some(Frequency::Often | Frequency::Always)),
    },
    Rule {
        code: "distress",
        message: "The behavior causes ongoing distress",
        predicate: |r| matches!(r.distress, Some(Distress::Moderate | Distress::High)),
    },
    RELATIONSHIP,
    Rule {
        code: "severity",
        message: "Severity is rated severe",
        predicate: |r| matches!(r.severity, Some(Severity::Severe)),
    },
];

impl RuleSet for SexualHealth {
    fn rules_for(issue: SexualIssue) -> &'static [Rule<R>] {
        match issue {
            SexualIssue::ErectileDysfunction => &ERECTILE_DYSFUNCTION,
            SexualIssue::PrematureEjaculation => &PREMATURE_EJACULATION,
            SexualIssue::DelayedEjaculation => &DELAYED_EJACULATION,
            SexualIssue::LowLibido => &LOW_LIBIDO,
            SexualIssue::PainfulIntercourse => &PAINFUL_INTERCOURSE,
            SexualIssue::CompulsiveSexualBehavior => &COMPULSIVE_SEXUAL_BEHAVIOR,
        }
    }
}
