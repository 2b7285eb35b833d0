use hearth_domain::recovery::{
    Impact, LossOfControl, QuitAttempts, RecoveryCategory, RecoveryResponse, UseFrequency,
    Withdrawal,
};
use hearth_domain::sexual_health::{
    Distress, Duration, Frequency, Pain, RelationshipImpact, Severity, SexualHealthResponse,
    SexualIssue,
};
use hearth_domain::{Recovery, SexualHealth};
use hearth_redflags::*;
use proptest::prelude::*;
use strum::IntoEnumIterator;

fn sexual(issue: SexualIssue, record: &SexualHealthResponse) -> RedFlagResult {
    evaluate::<SexualHealth>(issue, record)
}

fn recovery(category: RecoveryCategory, record: &RecoveryResponse) -> RedFlagResult {
    evaluate::<Recovery>(category, record)
}

#[test]
fn erectile_dysfunction_frequency_and_duration() {
    let record = SexualHealthResponse {
        frequency: Some(Frequency::Often),
        duration: Some(Duration::ThreePlusMonths),
        ..Default::default()
    };

    let result = sexual(SexualIssue::ErectileDysfunction, &record);
    assert!(result.triggered);
    assert_eq!(result.codes(), ["frequency", "duration"]);
}

#[test]
fn premature_ejaculation_below_thresholds_is_clear() {
    let record = SexualHealthResponse {
        frequency: Some(Frequency::Sometimes),
        duration: Some(Duration::Under1Month),
        ..Default::default()
    };

    let result = sexual(SexualIssue::PrematureEjaculation, &record);
    assert!(!result.triggered);
    assert!(result.indicators.is_empty());
}

#[test]
fn painful_intercourse_frequency_needs_pain() {
    let without_pain = SexualHealthResponse {
        frequency: Some(Frequency::Always),
        pain: Some(Pain::None),
        ..Default::default()
    };
    assert!(!sexual(SexualIssue::PainfulIntercourse, &without_pain).triggered);

    let mild = SexualHealthResponse { pain: Some(Pain::Mild), ..without_pain.clone() };
    assert_eq!(sexual(SexualIssue::PainfulIntercourse, &mild).codes(), ["frequency"]);

    let severe = SexualHealthResponse {
        pain: Some(Pain::Severe),
        duration: Some(Duration::OneToThreeMonths),
        ..without_pain
    };
    assert_eq!(sexual(SexualIssue::PainfulIntercourse, &severe).codes(), ["pain", "frequency", "duration"]);
}

#[test]
fn compulsive_behavior_rules() {
    let record = SexualHealthResponse {
        distress: Some(Distress::Moderate),
        relationship_impact: Some(RelationshipImpact::Significant),
        severity: Some(Severity::Severe),
        ..Default::default()
    };

    let result = sexual(SexualIssue::CompulsiveSexualBehavior, &record);
    assert_eq!(result.codes(), ["distress", "relationship", "severity"]);
}

#[test]
fn low_libido_ignores_frequency() {
    let record = SexualHealthResponse { frequency: Some(Frequency::Always), ..Default::default() };
    assert!(!sexual(SexualIssue::LowLibido, &record).triggered);
}

#[test]
fn nicotine_daily_indicates_dependence() {
    let record = RecoveryResponse { frequency: Some(UseFrequency::Daily), ..Default::default() };

    let result = recovery(RecoveryCategory::Nicotine, &record);
    assert!(result.messages().contains(&"Daily usage indicates physical dependence"));
}

#[test]
fn alcohol_rules() {
    let record = RecoveryResponse {
        frequency: Some(UseFrequency::Daily),
        withdrawal: Some(Withdrawal::Severe),
        loss_of_control: Some(LossOfControl::Often),
        quit_attempts: Some(QuitAttempts::Several),
        ..Default::default()
    };
    assert_eq!(recovery(RecoveryCategory::Alcohol, &record).codes(), ["frequency", "withdrawal", "control", "relapse"]);
}

#[test]
fn gambling_thresholds_are_lower() {
    let record = RecoveryResponse {
        frequency: Some(UseFrequency::SeveralTimesAWeek),
        loss_of_control: Some(LossOfControl::Sometimes),
        impact: Some(Impact::Some),
        ..Default::default()
    };
    assert_eq!(recovery(RecoveryCategory::Gambling, &record).codes(), ["frequency", "control"]);
    assert!(!recovery(RecoveryCategory::Pornography, &record).triggered);
}

fn sh() -> SexualHealthResponse {
    SexualHealthResponse::default()
}

fn rc() -> RecoveryResponse {
    RecoveryResponse::default()
}

/// One minimal record per `(issue, code)` that fires that rule and nothing else.
fn sexual_cases() -> Vec<(SexualIssue, &'static str, SexualHealthResponse)> {
    use SexualIssue::*;

    let often = SexualHealthResponse { frequency: Some(Frequency::Often), ..sh() };
    let long = SexualHealthResponse { duration: Some(Duration::ThreePlusMonths), ..sh() };
    let distressed = SexualHealthResponse { distress: Some(Distress::High), ..sh() };
    let strained =
        SexualHealthResponse { relationship_impact: Some(RelationshipImpact::Significant), ..sh() };
    let painful = SexualHealthResponse { pain: Some(Pain::Moderate), ..sh() };

    vec![
        (ErectileDysfunction, "frequency", often.clone()),
        (ErectileDysfunction, "duration", long.clone()),
        (ErectileDysfunction, "pain", SexualHealthResponse { pain: Some(Pain::Severe), ..sh() }),
        (ErectileDysfunction, "distress", distressed.clone()),
        (PrematureEjaculation, "frequency", often.clone()),
        (PrematureEjaculation, "duration", long.clone()),
        (PrematureEjaculation, "distress", distressed.clone()),
        (PrematureEjaculation, "relationship", strained.clone()),
        (
            DelayedEjaculation,
            "frequency",
            SexualHealthResponse { frequency: Some(Frequency::Always), ..sh() },
        ),
        (DelayedEjaculation, "duration", long.clone()),
        (DelayedEjaculation, "distress", distressed.clone()),
        (LowLibido, "duration", long.clone()),
        (LowLibido, "distress", distressed),
        (LowLibido, "relationship", strained.clone()),
        (PainfulIntercourse, "pain", painful),
        (
            PainfulIntercourse,
            "frequency",
            SexualHealthResponse {
                frequency: Some(Frequency::Sometimes),
                pain: Some(Pain::Mild),
                ..sh()
            },
        ),
        (
            PainfulIntercourse,
            "duration",
            SexualHealthResponse { duration: Some(Duration::OneToThreeMonths), ..sh() },
        ),
        (CompulsiveSexualBehavior, "frequency", often),
        (
            CompulsiveSexualBehavior,
            "distress",
            SexualHealthResponse { distress: Some(Distress::Moderate), ..sh() },
        ),
        (CompulsiveSexualBehavior, "relationship", strained),
        (
            CompulsiveSexualBehavior,
            "severity",
            SexualHealthResponse { severity: Some(Severity::Severe), ..sh() },
        ),
    ]
}

fn recovery_cases() -> Vec<(RecoveryCategory, &'static str, RecoveryResponse)> {
    use RecoveryCategory::*;

    let daily = RecoveryResponse { frequency: Some(UseFrequency::Daily), ..rc() };
    let withdrawn = RecoveryResponse { withdrawal: Some(Withdrawal::Moderate), ..rc() };
    let relapsing = RecoveryResponse { quit_attempts: Some(QuitAttempts::Several), ..rc() };
    let out_of_control = RecoveryResponse { loss_of_control: Some(LossOfControl::Often), ..rc() };
    let impacted = RecoveryResponse { impact: Some(Impact::Significant), ..rc() };

    vec![
        (Alcohol, "frequency", daily.clone()),
        (Alcohol, "withdrawal", RecoveryResponse { withdrawal: Some(Withdrawal::Severe), ..rc() }),
        (Alcohol, "control", out_of_control.clone()),
        (Alcohol, "relapse", relapsing.clone()),
        (Nicotine, "frequency", daily.clone()),
        (Nicotine, "withdrawal", withdrawn),
        (Nicotine, "relapse", relapsing.clone()),
        (Pornography, "frequency", daily),
        (Pornography, "control", out_of_control),
        (Pornography, "impact", impacted.clone()),
        (Pornography, "relapse", relapsing.clone()),
        (
            Gambling,
            "frequency",
            RecoveryResponse { frequency: Some(UseFrequency::SeveralTimesAWeek), ..rc() },
        ),
        (
            Gambling,
            "control",
            RecoveryResponse { loss_of_control: Some(LossOfControl::Sometimes), ..rc() },
        ),
        (Gambling, "impact", impacted),
        (Gambling, "relapse", relapsing),
    ]
}

#[test]
fn every_sexual_health_rule_fires_on_its_own() {
    let cases = sexual_cases();
    for (issue, code, record) in &cases {
        let result = sexual(*issue, record);
        assert!(result.triggered, "{issue}/{code} did not trigger");
        assert_eq!(result.codes(), [*code], "{issue}/{code}");
    }

    for (issue, rules) in audit::<SexualHealth>() {
        for rule in rules {
            assert!(
                cases.iter().any(|(i, code, _)| *i == issue && *code == rule.code),
                "no case covers {issue}/{}",
                rule.code
            );
        }
    }
}

#[test]
fn every_recovery_rule_fires_on_its_own() {
    let cases = recovery_cases();
    for (category, code, record) in &cases {
        let result = recovery(*category, record);
        assert!(result.triggered, "{category}/{code} did not trigger");
        assert_eq!(result.codes(), [*code], "{category}/{code}");
    }

    for (category, rules) in audit::<Recovery>() {
        for rule in rules {
            assert!(
                cases.iter().any(|(c, code, _)| *c == category && *code == rule.code),
                "no case covers {category}/{}",
                rule.code
            );
        }
    }
}

#[test]
fn empty_records_never_trigger() {
    for issue in SexualIssue::iter() {
        assert_eq!(sexual(issue, &SexualHealthResponse::default()), RedFlagResult::default());
    }
    for category in RecoveryCategory::iter() {
        assert_eq!(recovery(category, &RecoveryResponse::default()), RedFlagResult::default());
    }
}

#[test]
fn unknown_issue_ids_yield_empty_result() {
    let record = SexualHealthResponse { frequency: Some(Frequency::Always), ..Default::default() };

    assert_eq!(evaluate_raw::<SexualHealth>("not-an-issue", &record), RedFlagResult::default());
    assert!(evaluate_raw::<SexualHealth>("erectile-dysfunction", &record).triggered);
}

#[test]
fn every_table_is_non_empty_with_unique_codes() {
    for (issue, rules) in audit::<SexualHealth>() {
        assert!(!rules.is_empty(), "{issue} has no rules");
        let mut codes: Vec<_> = rules.iter().map(|r| r.code).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), rules.len(), "{issue} repeats a code");
    }
    assert_eq!(audit::<Recovery>().len(), 4);
    assert_eq!(rules_for::<Recovery>(RecoveryCategory::Nicotine).len(), 3);
}

fn any_frequency() -> impl Strategy<Value = Option<Frequency>> {
    proptest::option::of(proptest::sample::select(Frequency::iter().collect::<Vec<_>>()))
}

fn any_duration() -> impl Strategy<Value = Option<Duration>> {
    proptest::option::of(proptest::sample::select(Duration::iter().collect::<Vec<_>>()))
}

fn any_distress() -> impl Strategy<Value = Option<Distress>> {
    proptest::option::of(proptest::sample::select(Distress::iter().collect::<Vec<_>>()))
}

proptest! {
    #[test]
    fn notes_never_change_the_result(
        frequency in any_frequency(),
        duration in any_duration(),
        distress in any_distress(),
        notes in proptest::option::of(".{0,64}"),
    ) {
        let plain = SexualHealthResponse { frequency, duration, distress, ..Default::default() };
        let annotated = SexualHealthResponse { notes, ..plain.clone() };

        for issue in SexualIssue::iter() {
            let result = sexual(issue, &plain);
            prop_assert_eq!(&result, &sexual(issue, &annotated));
            prop_assert_eq!(result.triggered, !result.indicators.is_empty());
        }
    }
}
