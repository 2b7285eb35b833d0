//! Plain-text export of a module.

use crate::state::ModuleState;
use chrono::{DateTime, Utc};
use hearth_domain::{IssueId, ResponseRecord};
use hearth_redflags::{RuleSet, evaluate};

/// Default number of journal entries listed in a summary.
pub const DEFAULT_RECENT_ENTRIES: usize = 10;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M UTC";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOptions {
    /// Printed in the header; passed in so output is reproducible.
    pub generated_at: DateTime<Utc>,
    pub recent_entries: usize,
}

impl ExportOptions {
    #[must_use]
    pub const fn new(generated_at: DateTime<Utc>) -> Self {
        Self { generated_at, recent_entries: DEFAULT_RECENT_ENTRIES }
    }

    #[must_use]
    pub const fn recent_entries(mut self, n: usize) -> Self {
        self.recent_entries = n;
        self
    }
}

/// Renders a human-readable, line-oriented summary of `state`.
///
/// Red flags are evaluated fresh from the current answers; nothing stored is trusted for
/// them. Multi-line notes continue on lines indented by two spaces. With
/// `recent_entries == 0` the journal section is left out.
#[must_use]
pub fn build_summary<D: RuleSet>(state: &ModuleState<D>, options: &ExportOptions) -> String {
    let mut lines = vec![
        format!("Hearth export: {}", D::MODULE.title()),
        format!("Generated: {}", options.generated_at.format(TIMESTAMP_FORMAT)),
        "This summary reflects self-reported answers and is not a diagnosis.".to_owned(),
    ];

    for (issue, record) in state.records() {
        lines.push(String::new());
        lines.push(format!("== {} ==", issue.title()));

        let answers = record.answers();
        if answers.is_empty() && record.notes().is_none() {
            lines.push("No answers recorded.".to_owned());
        }
        lines.extend(answers.iter().map(|a| format!("{}: {}", a.label, humanize(a.value))));
        if let Some(notes) = record.notes() {
            push_notes(&mut lines, "Notes: ".to_owned(), notes);
        }

        let flags = evaluate::<D>(*issue, record);
        if flags.triggered {
            lines.push("Red flags:".to_owned());
            lines.extend(flags.indicators.iter().map(|i| format!("  - {i}")));
            lines.push("  Consider talking to a qualified professional.".to_owned());
        }
    }

    if options.recent_entries > 0 {
        lines.push(String::new());
        lines.push("== Recent entries ==".to_owned());
        if state.log().is_empty() {
            lines.push("No entries.".to_owned());
        }
    }
    for entry in state.log().recent(options.recent_entries) {
        let mut line = format!(
            "{} | {} | intensity {}",
            entry.at.format(TIMESTAMP_FORMAT),
            entry.category.title(),
            entry.intensity
        );
        if entry.slipped() {
            line.push_str(" | slip");
        }
        match entry.notes.as_deref() {
            Some(notes) => {
                line.push_str(" | ");
                push_notes(&mut lines, line, notes);
            },
            None => lines.push(line),
        }
    }

    lines.push(String::new());
    lines.join("\n")
}

/// Appends `notes` after `head`; every further non-blank line becomes an indented continuation.
fn push_notes(lines: &mut Vec<String>, head: String, notes: &str) {
    let mut rest = notes.lines().map(str::trim).filter(|l| !l.is_empty());
    match rest.next() {
        Some(first) => lines.push(head + first),
        None => lines.push(head.trim_end_matches([' ', '|']).to_owned()),
    }
    lines.extend(rest.map(|l| format!("  {l}")));
}

fn humanize(value: &str) -> String {
    value.replace('-', " ")
}
