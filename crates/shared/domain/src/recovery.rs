//! Recovery module: four addiction categories sharing one response form.

use crate::module::ModuleId;
use crate::record::{Answer, Domain, IssueId, ResponseRecord, choice, non_blank, push_answer};
use serde::{Deserialize, Serialize};

choice! {
    /// Tracked addiction category.
    RecoveryCategory { Alcohol, Nicotine, Pornography, Gambling }
}

choice! {
    /// How often the behavior occurs.
    UseFrequency { LessThanWeekly, Weekly, SeveralTimesAWeek, Daily }
}

choice! {
    /// How long the behavior has been going on.
    UseDuration {
        Under6Months = "under-6-months",
        SixToTwelveMonths,
        OneToFiveYears,
        FivePlusYears,
    }
}

choice! {
    /// Previous attempts to quit.
    QuitAttempts { None, One, Several }
}

choice! {
    Withdrawal { None, Mild, Moderate, Severe }
}

choice! {
    /// Impact on work, finances or relationships.
    Impact { None, Some, Significant }
}

choice! {
    LossOfControl { Never, Sometimes, Often }
}

impl IssueId for RecoveryCategory {
    fn title(self) -> &'static str {
        match self {
            Self::Alcohol => "Alcohol",
            Self::Nicotine => "Nicotine",
            Self::Pornography => "Pornography",
            Self::Gambling => "Gambling",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecoveryResponse {
    pub frequency: Option<UseFrequency>,
    pub duration: Option<UseDuration>,
    pub quit_attempts: Option<QuitAttempts>,
    pub withdrawal: Option<Withdrawal>,
    pub impact: Option<Impact>,
    pub loss_of_control: Option<LossOfControl>,
    pub notes: Option<String>,
}

impl ResponseRecord for RecoveryResponse {
    fn answers(&self) -> Vec<Answer> {
        let mut out = Vec::with_capacity(6);
        push_answer(&mut out, "frequency", "Frequency", self.frequency);
        push_answer(&mut out, "duration", "Duration", self.duration);
        push_answer(&mut out, "quit_attempts", "Quit attempts", self.quit_attempts);
        push_answer(&mut out, "withdrawal", "Withdrawal", self.withdrawal);
        push_answer(&mut out, "impact", "Impact", self.impact);
        push_answer(&mut out, "loss_of_control", "Loss of control", self.loss_of_control);
        out
    }

    fn notes(&self) -> Option<&str> {
        non_blank(self.notes.as_ref())
    }
}

/// Marker for the recovery module.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Recovery;

impl Domain for Recovery {
    type Issue = RecoveryCategory;
    type Response = RecoveryResponse;

    const MODULE: ModuleId = ModuleId::Recovery;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_values() {
        assert_eq!(UseFrequency::SeveralTimesAWeek.to_string(), "several-times-a-week");
        assert_eq!(UseDuration::Under6Months.to_string(), "under-6-months");
        assert_eq!("five-plus-years".parse::<UseDuration>().unwrap(), UseDuration::FivePlusYears);
        assert_eq!(RecoveryCategory::parse("gambling"), Some(RecoveryCategory::Gambling));
    }

    #[test]
    fn test_records_roundtrip_with_enum_keys() {
        let mut records = Recovery::empty_records();
        records.get_mut(&RecoveryCategory::Alcohol).unwrap().frequency = Some(UseFrequency::Daily);

        let json = serde_json::to_string(&records).unwrap();
        assert!(json.contains("\"alcohol\":{\"frequency\":\"daily\""));

        let back: crate::Records<Recovery> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, records);
    }
}
