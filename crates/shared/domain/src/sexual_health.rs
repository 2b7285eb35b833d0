//! Sexual-health module: six issues sharing one response form.

use crate::module::ModuleId;
use crate::record::{Answer, Domain, IssueId, ResponseRecord, choice, non_blank, push_answer};
use serde::{Deserialize, Serialize};

choice! {
    /// Self-reported sexual-health issue.
    SexualIssue {
        ErectileDysfunction,
        PrematureEjaculation,
        DelayedEjaculation,
        LowLibido,
        PainfulIntercourse,
        CompulsiveSexualBehavior,
    }
}

choice! {
    /// How often the issue occurs.
    Frequency { Never, Rarely, Sometimes, Often, Always }
}

choice! {
    /// How long the issue has been present.
    Duration {
        Under1Month = "under-1-month",
        OneToThreeMonths,
        ThreePlusMonths,
    }
}

choice! {
    Severity { Mild, Moderate, Severe }
}

choice! {
    /// Personal distress caused by the issue.
    Distress { None, Low, Moderate, High }
}

choice! {
    RelationshipImpact { None, Some, Significant }
}

choice! {
    Pain { None, Mild, Moderate, Severe }
}

impl IssueId for SexualIssue {
    fn title(self) -> &'static str {
        match self {
            Self::ErectileDysfunction => "Erectile dysfunction",
            Self::PrematureEjaculation => "Premature ejaculation",
            Self::DelayedEjaculation => "Delayed ejaculation",
            Self::LowLibido => "Low libido",
            Self::PainfulIntercourse => "Painful intercourse",
            Self::CompulsiveSexualBehavior => "Compulsive sexual behavior",
        }
    }
}

/// Answers for one sexual-health issue. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SexualHealthResponse {
    pub frequency: Option<Frequency>,
    pub duration: Option<Duration>,
    pub severity: Option<Severity>,
    pub distress: Option<Distress>,
    pub relationship_impact: Option<RelationshipImpact>,
    pub pain: Option<Pain>,
    pub notes: Option<String>,
}

impl ResponseRecord for SexualHealthResponse {
    fn answers(&self) -> Vec<Answer> {
        let mut out = Vec::with_capacity(6);
        push_answer(&mut out, "frequency", "Frequency", self.frequency);
        push_answer(&mut out, "duration", "Duration", self.duration);
        push_answer(&mut out, "severity", "Severity", self.severity);
        push_answer(&mut out, "distress", "Distress", self.distress);
        push_answer(&mut out, "relationship_impact", "Relationship impact", self.relationship_impact);
        push_answer(&mut out, "pain", "Pain", self.pain);
        out
    }

    fn notes(&self) -> Option<&str> {
        non_blank(self.notes.as_ref())
    }
}

/// Marker for the sexual-health module.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SexualHealth;

impl Domain for SexualHealth {
    type Issue = SexualIssue;
    type Response = SexualHealthResponse;

    const MODULE: ModuleId = ModuleId::SexualHealth;
}
