use crate::args::Command;
use anyhow::{Context, Result, bail};
use chrono::Utc;
use hearth::Hearth;
use hearth::consent::GateState;
use hearth::domain::{IssueId, ModuleId, Recovery, ResponseRecord, SexualHealth};
use hearth::domain::{Intensity, LogDraft};
use hearth::module::{Confirmation, ExportOptions, ModuleController, SaveStatus};
use hearth::redflags::RuleSet;
use serde_json::Value;
use std::io::Write;
use strum::IntoEnumIterator;
use tracing::info;

/// Runs `$body` with `$d` bound to the domain type of `$module`.
macro_rules! with_domain {
    ($module:expr, $d:ident => $body:expr) => {
        match $module {
            ModuleId::SexualHealth => {
                type $d = SexualHealth;
                $body
            },
            ModuleId::Recovery => {
                type $d = Recovery;
                $body
            },
        }
    };
}

/// Executes one command against an opened runtime.
///
/// # Errors
/// Fails when a module is locked, an id or answer does not parse, or the vault could not
/// persist a change.
pub async fn run(hearth: &Hearth, command: Command, out: &mut dyn Write) -> Result<()> {
    match command {
        Command::Status => status(hearth, out).await,
        Command::Consent { module } => consent(hearth, module, out).await,
        Command::Answer { module, issue, answers } => {
            with_domain!(module, D => answer::<D>(hearth, &issue, &answers, out).await)
        },
        Command::Log { module, category, intensity, slip, notes } => {
            let intensity = Intensity::try_from(intensity)?;
            with_domain!(module, D => log::<D>(hearth, &category, intensity, slip, notes, out).await)
        },
        Command::Flags { module } => {
            let modules = module.map_or_else(|| hearth::MODULES.to_vec(), |m| vec![m]);
            for module in modules {
                with_domain!(module, D => flags::<D>(hearth, out).await)?;
            }
            Ok(())
        },
        Command::Export { module, out: path, recent } => {
            let recent = recent.unwrap_or(hearth.config().export.recent_entries);
            let options = ExportOptions::new(Utc::now()).recent_entries(recent);
            let summary = with_domain!(module, D => open::<D>(hearth).await?.export(&options));

            match path {
                Some(path) => {
                    std::fs::write(&path, summary)
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                    writeln!(out, "Export written to {}", path.display())?;
                },
                None => out.write_all(summary.as_bytes())?,
            }
            Ok(())
        },
        Command::Reset { module, yes } => {
            let done = with_domain!(module, D => open::<D>(hearth).await?.reset(yes.into()).await?);
            report_removal(out, module, done, "reset")
        },
        Command::Wipe { module, yes } => {
            let done = with_domain!(module, D => open::<D>(hearth).await?.wipe(Confirmation::from(yes)).await?);
            report_removal(out, module, done, "wiped")
        },
    }
}

async fn status(hearth: &Hearth, out: &mut dyn Write) -> Result<()> {
    let encryption = if hearth.vault().crypto_available() {
        "AES-256-GCM"
    } else {
        "unavailable, values are stored as plaintext"
    };
    writeln!(out, "Encryption: {encryption}")?;

    for module in hearth::MODULES.iter().copied() {
        let mut gate = hearth.gate(module);
        if gate.refresh().await? == GateState::Locked {
            writeln!(out, "{}: locked", module.title())?;
            continue;
        }

        with_domain!(module, D => {
            let controller = open::<D>(hearth).await?;
            let state = controller.state();
            let answered = state.records().values().filter(|r| !r.is_empty()).count();
            writeln!(
                out,
                "{}: unlocked, {answered}/{} answered, {} journal entries, {} red flags",
                module.title(),
                state.records().len(),
                state.log().len(),
                controller.all_red_flags().len(),
            )?;
        });
    }
    Ok(())
}

async fn consent(hearth: &Hearth, module: ModuleId, out: &mut dyn Write) -> Result<()> {
    let mut gate = hearth.gate(module);
    if gate.refresh().await? == GateState::Unlocked {
        writeln!(out, "{} is already unlocked", module.title())?;
        return Ok(());
    }

    let access = gate.enter().await?;
    info!(module = %access.module(), "Consent granted");
    writeln!(out, "{} unlocked. Answers stay on this device, encrypted.", module.title())?;
    Ok(())
}

async fn answer<D: RuleSet>(
    hearth: &Hearth,
    raw_issue: &str,
    assignments: &[(String, String)],
    out: &mut dyn Write,
) -> Result<()> {
    let mut module = open::<D>(hearth).await?;
    let issue = parse_issue::<D>(raw_issue)?;

    let record = apply_answers(module.record(issue), assignments)
        .with_context(|| format!("Invalid answer for {raw_issue}"))?;
    module.set_record(issue, record);
    save(&mut module, out).await?;

    let result = module.red_flags(issue);
    if result.triggered {
        writeln!(out, "{} raises red flags:", issue.title())?;
        for indicator in &result.indicators {
            writeln!(out, "  - {indicator}")?;
        }
    } else {
        writeln!(out, "{}: saved, no red flags", issue.title())?;
    }
    Ok(())
}

async fn log<D: RuleSet>(
    hearth: &Hearth,
    raw_category: &str,
    intensity: Intensity,
    slip: bool,
    notes: Option<String>,
    out: &mut dyn Write,
) -> Result<()> {
    let mut module = open::<D>(hearth).await?;
    let category = parse_issue::<D>(raw_category)?;

    let mut draft = LogDraft::new(category, intensity).slip(slip);
    if let Some(notes) = notes {
        draft = draft.notes(notes);
    }
    let id = module.append_log_entry(draft).id.clone();
    save(&mut module, out).await?;

    writeln!(out, "Logged {} at intensity {intensity} ({id})", category.title())?;
    Ok(())
}

async fn flags<D: RuleSet>(hearth: &Hearth, out: &mut dyn Write) -> Result<()> {
    let mut gate = hearth.gate(D::MODULE);
    if gate.refresh().await? == GateState::Locked {
        writeln!(out, "== {} == (locked)", D::MODULE.title())?;
        return Ok(());
    }

    let module = open::<D>(hearth).await?;
    writeln!(out, "== {} ==", D::MODULE.title())?;

    let flagged = module.all_red_flags();
    if flagged.is_empty() {
        writeln!(out, "No red flags.")?;
    }
    for (issue, result) in flagged {
        writeln!(out, "{}:", issue.title())?;
        for indicator in &result.indicators {
            writeln!(out, "  - {indicator}")?;
        }
    }
    Ok(())
}

/// Opens a module, failing with a hint when it is still locked.
async fn open<D: RuleSet>(hearth: &Hearth) -> Result<ModuleController<D>> {
    let mut gate = hearth.gate(D::MODULE);
    gate.refresh().await.context("Could not load consent")?;
    let access = gate.access().with_context(|| {
        format!("{} is locked; run `hearth consent {}` first", D::MODULE.title(), D::MODULE)
    })?;

    hearth
        .module::<D>(access)
        .await
        .with_context(|| format!("Could not load {} data; nothing was changed", D::MODULE.title()))
}

async fn save<D: RuleSet>(module: &mut ModuleController<D>, out: &mut dyn Write) -> Result<()> {
    match module.save().await {
        SaveStatus::Error => bail!("Could not save {} data", D::MODULE.title()),
        _ if module.indicator().degraded() => {
            writeln!(out, "Warning: encryption unavailable, saved as plaintext")?;
        },
        _ => {},
    }
    Ok(())
}

fn parse_issue<D: RuleSet>(raw: &str) -> Result<D::Issue> {
    D::Issue::parse(raw).with_context(|| {
        let known: Vec<String> = D::Issue::iter().map(|i| i.to_string()).collect();
        format!("Unknown {} issue '{raw}' (expected one of: {})", D::MODULE, known.join(", "))
    })
}

/// Applies `field=value` pairs to a record through its serde form, so ids are validated by
/// the same rules as stored data. An empty value clears the field.
fn apply_answers<R: ResponseRecord>(record: &R, assignments: &[(String, String)]) -> Result<R> {
    let mut value = serde_json::to_value(record)?;
    let fields = value.as_object_mut().context("Response record is not an object")?;

    for (field, raw) in assignments {
        if !fields.contains_key(field) {
            let known: Vec<&str> = fields.keys().map(String::as_str).collect();
            bail!("Unknown field '{field}' (expected one of: {})", known.join(", "));
        }
        let next = if raw.is_empty() { Value::Null } else { Value::String(raw.clone()) };
        fields.insert(field.clone(), next);
    }

    Ok(serde_json::from_value(value)?)
}

fn report_removal(out: &mut dyn Write, module: ModuleId, done: bool, verb: &str) -> Result<()> {
    if done {
        writeln!(out, "{} {verb}", module.title())?;
    } else {
        writeln!(out, "Nothing changed; pass --yes to confirm")?;
    }
    Ok(())
}
