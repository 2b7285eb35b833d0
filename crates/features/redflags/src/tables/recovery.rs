use crate::rule::{Rule, RuleSet};
use hearth_domain::recovery::{
    Impact, LossOfControl, QuitAttempts, RecoveryCategory, RecoveryResponse, UseFrequency,
    Withdrawal,
};
use hearth_domain::Recovery;

type R = RecoveryResponse;

const WITHDRAWAL: Rule<R> = Rule {
    code: "withdrawal",
    message: "Moderate or severe withdrawal symptoms",
    predicate: |r| matches!(r.withdrawal, Some(Withdrawal::Moderate | Withdrawal::Severe)),
};

const LOST_CONTROL: Rule<R> = Rule {
    code: "control",
    message: "Frequent loss of control",
    predicate: |r| matches!(r.loss_of_control, Some(LossOfControl::Often)),
};

const SIGNIFICANT_IMPACT: Rule<R> = Rule {
    code: "impact",
    message: "Significant impact on work, finances or relationships",
    predicate: |r| matches!(r.impact, Some(Impact::Significant)),
};

const RELAPSE: Rule<R> = Rule {
    code: "relapse",
    message: "Several quit attempts suggest structured support may help",
    predicate: |r| matches!(r.quit_attempts, Some(QuitAttempts::Several)),
};

static ALCOHOL: [Rule<R>; 4] = [
    Rule {
        code: "frequency",
        message: "Daily drinking",
        predicate: |r| matches!(r.frequency, Some(UseFrequency::Daily)),
    },
    Rule {
        code: "withdrawal",
        message: "Alcohol withdrawal can be medically dangerous; seek supervised support",
        predicate: |r| matches!(r.withdrawal, Some(Withdrawal::Moderate | Withdrawal::Severe)),
    },
    LOST_CONTROL,
    RELAPSE,
];

static NICOTINE: [Rule<R>; 3] = [
    Rule {
        code: "frequency",
        message: "Daily usage indicates physical dependence",
        predicate: |r| matches!(r.frequency, Some(UseFrequency::Daily)),
    },
    WITHDRAWAL,
    RELAPSE,
];

static PORNOGRAPHY: [Rule<R>; 4] = [
    Rule {
        code: "frequency",
        message: "Daily use",
        predicate: |r| matches!(r.frequency, Some(UseFrequency::Daily)),
    },
    LOST_CONTROL,
    SIGNIFICANT_IMPACT,
    RELAPSE,
];

static GAMBLING: [Rule<R>; 4] = [
    Rule {
        code: "frequency",
        message: "Gambling several times a week or more",
        predicate: |r| {
            matches!(r.frequency, Some(UseFrequency::SeveralTimesAWeek | UseFrequency::Daily))
        },
    },
    Rule {
        code: "control",
        message: "Difficulty stopping once started",
        predicate: |r| {
            matches!(r.loss_of_control, Some(LossOfControl::Sometimes | LossOfControl::Often))
        },
    },
    SIGNIFICANT_IMPACT,
    RELAPSE,
];

impl RuleSet for Recovery {
    fn rules_for(category: RecoveryCategory) -> &'static [Rule<R>] {
        match category {
            RecoveryCategory::Alcohol => &ALCOHOL,
            RecoveryCategory::Nicotine => &NICOTINE,
            RecoveryCategory::Pornography => &PORNOGRAPHY,
            RecoveryCategory::Gambling => &GAMBLING,
        }
    }
}
