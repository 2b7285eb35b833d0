//! # CLI Argument Definitions

use clap::{Parser, Subcommand};
use hearth::domain::ModuleId;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "hearth")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(arg_required_else_help = true)]
#[command(about = "Private, encrypted self-check for sexual health and recovery")]
pub struct Cli {
    /// Config file; `./hearth.toml` is used when present
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Overrides `logging.level` (e.g. `debug`, `off`)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show lock state, progress and red flags of every module
    Status,
    /// Accept the privacy notice and unlock a module
    Consent { module: ModuleId },
    /// Set answers for one issue; an empty value clears a field
    Answer {
        module: ModuleId,
        /// Issue id, e.g. `erectile-dysfunction` or `alcohol`
        issue: String,
        #[arg(required = true, value_name = "FIELD=VALUE", value_parser = parse_assignment)]
        answers: Vec<(String, String)>,
    },
    /// Append a craving or event to the journal
    Log {
        module: ModuleId,
        category: String,
        /// Intensity from 1 to 5
        #[arg(short, long)]
        intensity: u8,
        /// Mark the entry as a slip
        #[arg(long)]
        slip: bool,
        #[arg(short, long)]
        notes: Option<String>,
    },
    /// List the issues that currently raise red flags
    Flags { module: Option<ModuleId> },
    /// Write a plain-text summary to stdout or a file
    Export {
        module: ModuleId,
        #[arg(short, long)]
        out: Option<PathBuf>,
        /// Number of journal entries to include
        #[arg(long)]
        recent: Option<usize>,
    },
    /// Delete a module's answers and journal, keeping consent
    Reset {
        module: ModuleId,
        #[arg(long)]
        yes: bool,
    },
    /// Delete a module's answers, journal and consent
    Wipe {
        module: ModuleId,
        #[arg(long)]
        yes: bool,
    },
}

fn parse_assignment(raw: &str) -> Result<(String, String), String> {
    let (field, value) =
        raw.split_once('=').ok_or_else(|| format!("expected FIELD=VALUE, got '{raw}'"))?;
    let field = field.trim();
    if field.is_empty() {
        return Err(format!("missing field name in '{raw}'"));
    }
    Ok((field.to_owned(), value.trim().to_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn assignments_split_on_first_equals() {
        assert_eq!(parse_assignment("notes=a=b").unwrap(), ("notes".into(), "a=b".into()));
        assert_eq!(parse_assignment(" pain = ").unwrap(), ("pain".into(), String::new()));
        assert!(parse_assignment("frequency").is_err());
        assert!(parse_assignment("=often").is_err());
    }

    #[test]
    fn modules_parse_by_kebab_id() {
        let cli = Cli::try_parse_from(["hearth", "reset", "sexual-health", "--yes"]).unwrap();
        assert!(matches!(cli.command, Command::Reset { module: ModuleId::SexualHealth, yes: true }));
        assert!(Cli::try_parse_from(["hearth", "consent", "gaming"]).is_err());
    }
}
