//! # Hearth CLI
//!
//! A thin host over the [`hearth`] facade: loads configuration, installs the logger, opens the
//! file-backed vault and runs one command. Command output goes to the writer passed to
//! [`run`]; logs go to stderr.

mod args;
mod commands;

pub use args::{Cli, Command};
pub use commands::run;

use anyhow::Result;
use hearth::domain::config::LoggingConfig;
use hearth_logger::{Logger, parse_filter};

/// Installs the global subscriber from the `logging` section. `level` overrides the
/// configured level; both accept a level name or filter directives.
///
/// # Errors
/// Fails for an unknown level, malformed directives, or an unusable log directory.
pub fn init_logger(cfg: &LoggingConfig, level: Option<&str>) -> Result<Logger> {
    let filter = parse_filter(level.unwrap_or(&cfg.level))?;

    let builder = Logger::builder().name("hearth").filter(filter).ansi(cfg.ansi);

    let logger = match &cfg.dir {
        Some(dir) => builder.path(dir).json(true).init()?,
        None => builder.init()?,
    };

    Ok(logger)
}
